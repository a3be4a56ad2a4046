use crate::board::Board;
use crate::observer::Observer;
use serde::Serialize;

/// Represents the reason the simulation stopped.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum Outcome {
    /// Every occupant is happy; no further relocation would occur.
    Converged,
    /// The iteration budget ran out before the board converged.
    BudgetExhausted,
}

/// The Schelling segregation simulation.
/// Main entry point for advancing a board until it converges or the
/// iteration budget runs out.
pub struct Simulation {
    board: Board,
    threshold: f64,
    remaining_iterations: usize,
    rounds: usize,
    outcome: Option<Outcome>,
}

impl Simulation {
    /// Creates a new simulation.
    ///
    /// # Arguments
    /// * `board` - The initial board. The simulation takes exclusive
    ///   ownership of it for its lifetime.
    /// * `threshold` - The fraction of same-type neighbors, conventionally in
    ///   `[0, 1]`, at or above which an occupant is happy.
    /// * `iterations` - The total relocation budget. Every relocation attempt
    ///   consumes one iteration, including no-op attempts on a full board.
    pub fn new(board: Board, threshold: f64, iterations: usize) -> Simulation {
        Simulation {
            board,
            threshold,
            remaining_iterations: iterations,
            rounds: 0,
            outcome: None,
        }
    }

    /// Runs rounds until the board converges or the budget is exhausted.
    ///
    /// Each round takes a snapshot of the unhappy occupants in row-major scan
    /// order and relocates every one of them, in that order, without
    /// re-checking happiness mid-round. The observer is notified after every
    /// relocation, after every completed round, and once when the simulation
    /// stops.
    pub fn run(&mut self, observer: &mut dyn Observer) -> Outcome {
        observer.on_start(&self.board);

        loop {
            let unhappy = self.board.unhappy_indices(self.threshold);

            if unhappy.is_empty() {
                return self.finish(Outcome::Converged, observer);
            }

            if self.remaining_iterations == 0 {
                return self.finish(Outcome::BudgetExhausted, observer);
            }

            for index in unhappy {
                let destination = self.board.relocate(index);
                self.remaining_iterations -= 1;
                observer.on_relocation(&self.board, index, destination);

                // Out of budget mid-round: the rest of the snapshot is dropped
                if self.remaining_iterations == 0 {
                    return self.finish(Outcome::BudgetExhausted, observer);
                }
            }

            self.rounds += 1;
            observer.on_round(&self.board, self.rounds);
        }
    }

    /// A read-only snapshot of the current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The number of relocation attempts still available.
    pub fn remaining_iterations(&self) -> usize {
        self.remaining_iterations
    }

    /// The number of fully completed rounds.
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// The terminal outcome. `None` until the simulation has run to
    /// completion.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    fn finish(&mut self, outcome: Outcome, observer: &mut dyn Observer) -> Outcome {
        self.outcome = Some(outcome);
        observer.on_finish(&self.board, outcome);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;
    use crate::observer::NoOpObserver;

    #[test]
    fn when_all_occupants_are_happy_the_simulation_converges_without_consuming_budget() {
        let board = Board::parse("$$\n$$");
        let mut sim = Simulation::new(board, 1.0, 10);

        assert_eq!(sim.run(&mut NoOpObserver), Outcome::Converged);
        assert_eq!(sim.remaining_iterations(), 10);
        assert_eq!(sim.rounds(), 0);
        assert_eq!(sim.outcome(), Some(Outcome::Converged));
    }

    #[test]
    fn when_running_a_one_by_three_board_it_converges_after_two_relocations() {
        // Both occupants see only a different-type neighbor, so both are in
        // the first round's snapshot. A moves to the empty cell at index 2,
        // then B wraps around to index 0, leaving both isolated.
        let board = Board::parse("$. ");
        let mut sim = Simulation::new(board, 1.0, 10);

        assert_eq!(sim.run(&mut NoOpObserver), Outcome::Converged);
        assert_eq!(sim.remaining_iterations(), 8);
        assert_eq!(sim.rounds(), 1);
        assert_eq!(sim.board(), &Board::parse(". $"));
    }

    #[test]
    fn when_the_budget_runs_out_mid_round_the_remaining_snapshot_is_not_processed() {
        let board = Board::parse("$. ");
        let mut sim = Simulation::new(board, 1.0, 1);

        assert_eq!(sim.run(&mut NoOpObserver), Outcome::BudgetExhausted);
        assert_eq!(sim.remaining_iterations(), 0);
        // Only A moved; B was still in the snapshot when the budget hit zero
        assert_eq!(sim.board().get(0, 0), Cell::Empty);
        assert_eq!(sim.board().get(0, 1), Cell::TypeB);
        assert_eq!(sim.board().get(0, 2), Cell::TypeA);
    }

    #[test]
    fn when_the_budget_is_zero_and_occupants_are_unhappy_it_exhausts_immediately() {
        let board = Board::parse("$. ");
        let mut sim = Simulation::new(board, 1.0, 0);

        assert_eq!(sim.run(&mut NoOpObserver), Outcome::BudgetExhausted);
        assert_eq!(sim.board(), &Board::parse("$. "));
    }

    #[test]
    fn when_the_board_is_full_every_no_op_relocation_still_consumes_budget() {
        let board = Board::parse("$.\n.$");
        let mut sim = Simulation::new(board, 1.0, 7);

        assert_eq!(sim.run(&mut NoOpObserver), Outcome::BudgetExhausted);
        assert_eq!(sim.remaining_iterations(), 0);
        // Nothing could move on a full board
        assert_eq!(sim.board(), &Board::parse("$.\n.$"));
    }

    #[test]
    fn when_running_to_completion_the_occupant_counts_are_conserved() {
        let board = Board::parse("$.$.\n.$.$\n$.$.\n    ");
        let type_a = board.count(Cell::TypeA);
        let type_b = board.count(Cell::TypeB);
        let mut sim = Simulation::new(board, 0.5, 1000);

        sim.run(&mut NoOpObserver);

        assert_eq!(sim.board().count(Cell::TypeA), type_a);
        assert_eq!(sim.board().count(Cell::TypeB), type_b);
    }

    struct RecordingObserver {
        events: Vec<String>,
    }

    impl Observer for RecordingObserver {
        fn on_start(&mut self, _board: &Board) {
            self.events.push("start".to_string());
        }

        fn on_relocation(&mut self, _board: &Board, from: usize, to: Option<usize>) {
            self.events.push(format!("move {} -> {:?}", from, to));
        }

        fn on_round(&mut self, _board: &Board, round: usize) {
            self.events.push(format!("round {}", round));
        }

        fn on_finish(&mut self, _board: &Board, outcome: Outcome) {
            self.events.push(format!("finish {:?}", outcome));
        }
    }

    #[test]
    fn when_running_the_observer_sees_relocations_in_scan_order() {
        let board = Board::parse("$. ");
        let mut sim = Simulation::new(board, 1.0, 10);
        let mut observer = RecordingObserver { events: Vec::new() };

        sim.run(&mut observer);

        let events: Vec<&str> = observer.events.iter().map(|event| event.as_str()).collect();
        assert_eq!(
            events,
            vec![
                "start",
                "move 0 -> Some(2)",
                "move 1 -> Some(0)",
                "round 1",
                "finish Converged",
            ]
        );
    }
}
