use console::Term;

use crate::context::AppContext;
use crate::domain::board::compute_view;
use crate::error::AppResult;
use crate::render::BoardRenderer;
use crate::workflow::board::{BoardRequest, load_board};

pub async fn run(ctx: &AppContext, request: BoardRequest) -> AppResult<()> {
    let outcome = load_board(ctx, request).await?;
    let groups = compute_view(outcome.store.tickets(), &outcome.options);

    let colors = Term::stdout().features().colors_supported();
    let board = BoardRenderer::new(&outcome.store, colors).render(&outcome.options, &groups);
    print!("{board}");

    if outcome.saved {
        println!("\nView saved to {}", ctx.state_location.display());
    }
    Ok(())
}
