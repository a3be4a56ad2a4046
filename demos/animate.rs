use schelling::{Board, ConsoleRenderer, Simulation, Verbosity};
use std::time::Duration;

fn main() {
    // A deliberately mixed board: at a 0.5 threshold most occupants start
    // out unhappy, which makes for a lively animation
    let board = Board::parse(concat!(
        "$.$.$.$.\n",
        ".$.$.$.$\n",
        "$.$.$.$.\n",
        "        \n",
        ".$.$.$.$\n",
        "$.$.$.$.\n",
    ));

    let mut renderer = ConsoleRenderer::new(Verbosity::Verbose, Duration::from_millis(100));
    let mut simulation = Simulation::new(board, 0.5, 500);
    simulation.run(&mut renderer);
}
