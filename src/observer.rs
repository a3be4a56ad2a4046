use crate::board::Board;
use crate::sim::Outcome;
use crossterm::{
    cursor::Hide,
    execute,
    style::{Color, Print, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use serde_json::json;
use std::fs::File;
use std::io::{self, stdout, BufWriter, Write};
use std::thread;
use std::time::Duration;

/// Assembles the observer for a run from the output options.
///
/// Verbosity controls console rendering, and a trace filename adds a JSON
/// trace of every relocation. When both are requested the notifications are
/// fanned out to both.
pub fn create_observer(
    verbosity: Verbosity,
    delay: Duration,
    trace_filename: Option<String>,
) -> Box<dyn Observer> {
    let mut observers: Vec<Box<dyn Observer>> = Vec::new();

    if verbosity != Verbosity::Silent {
        observers.push(Box::new(ConsoleRenderer::new(verbosity, delay)));
    }

    if let Some(filename) = trace_filename {
        observers.push(Box::new(JsonTraceLogger::new(filename)));
    }

    match observers.len() {
        0 => Box::new(NoOpObserver),
        1 => observers.pop().unwrap(),
        _ => Box::new(Fanout::new(observers)),
    }
}

/// Receives notifications from the round driver as the simulation advances.
///
/// All methods default to doing nothing so that implementations only
/// override the hooks they care about. The engine itself performs no I/O;
/// anything user-facing happens here.
pub trait Observer {
    #[allow(unused_variables)]
    fn on_start(&mut self, board: &Board) {}

    #[allow(unused_variables)]
    fn on_relocation(&mut self, board: &Board, from: usize, to: Option<usize>) {}

    #[allow(unused_variables)]
    fn on_round(&mut self, board: &Board, round: usize) {}

    #[allow(unused_variables)]
    fn on_finish(&mut self, board: &Board, outcome: Outcome) {}
}

/// How much of the simulation to show on the console.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Verbosity {
    /// No console output at all.
    Silent,
    /// Draw the board after each round and once more with the outcome when
    /// the simulation stops.
    Normal,
    /// Redraw the board after every individual relocation, with a delay
    /// between frames.
    Verbose,
}

pub struct NoOpObserver;
impl Observer for NoOpObserver {}

/// Dispatches every notification to a list of observers, in order.
pub struct Fanout {
    observers: Vec<Box<dyn Observer>>,
}

impl Fanout {
    pub fn new(observers: Vec<Box<dyn Observer>>) -> Fanout {
        Fanout { observers }
    }
}

impl Observer for Fanout {
    fn on_start(&mut self, board: &Board) {
        for observer in &mut self.observers {
            observer.on_start(board);
        }
    }

    fn on_relocation(&mut self, board: &Board, from: usize, to: Option<usize>) {
        for observer in &mut self.observers {
            observer.on_relocation(board, from, to);
        }
    }

    fn on_round(&mut self, board: &Board, round: usize) {
        for observer in &mut self.observers {
            observer.on_round(board, round);
        }
    }

    fn on_finish(&mut self, board: &Board, outcome: Outcome) {
        for observer in &mut self.observers {
            observer.on_finish(board, outcome);
        }
    }
}

/// Draws the board to the console, gated by the verbosity level.
pub struct ConsoleRenderer<W: Write = io::Stdout> {
    verbosity: Verbosity,
    delay: Duration,
    out: W,
}

impl ConsoleRenderer {
    pub fn new(verbosity: Verbosity, delay: Duration) -> ConsoleRenderer {
        ConsoleRenderer::with_writer(verbosity, delay, stdout())
    }
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn with_writer(verbosity: Verbosity, delay: Duration, out: W) -> ConsoleRenderer<W> {
        ConsoleRenderer {
            verbosity,
            delay,
            out,
        }
    }

    fn draw(&mut self, board: &Board, clear: bool) {
        if clear {
            execute!(self.out, Clear(ClearType::All), Hide).unwrap();
        }

        for row in 0..board.height() {
            for col in 0..board.width() {
                let cell = board.get(row, col);
                execute!(
                    self.out,
                    SetForegroundColor(cell.color()),
                    Print(cell.to_char()),
                    SetForegroundColor(Color::Reset)
                )
                .unwrap();
            }
            execute!(self.out, Print("\n")).unwrap();
        }

        self.out.flush().unwrap();
    }
}

impl<W: Write> Observer for ConsoleRenderer<W> {
    fn on_start(&mut self, board: &Board) {
        if self.verbosity == Verbosity::Verbose {
            self.draw(board, true);
        }
    }

    fn on_relocation(&mut self, board: &Board, _from: usize, _to: Option<usize>) {
        if self.verbosity == Verbosity::Verbose {
            self.draw(board, true);
            thread::sleep(self.delay);
        }
    }

    fn on_round(&mut self, board: &Board, _round: usize) {
        if self.verbosity == Verbosity::Normal {
            self.draw(board, false);
        }
    }

    fn on_finish(&mut self, board: &Board, outcome: Outcome) {
        // The final board is always shown when not silent: a run can stop
        // without a completed round (zero-round convergence or mid-round
        // budget exhaustion), so the per-round hook is not enough
        if self.verbosity != Verbosity::Silent {
            self.draw(board, self.verbosity == Verbosity::Verbose);
        }

        let message = match outcome {
            Outcome::Converged => "All occupants are happy",
            Outcome::BudgetExhausted => "Ran out of iterations",
        };
        execute!(self.out, Print(message), Print("\n")).unwrap();
    }
}

/// Records every relocation plus the final outcome and saves them as pretty
/// JSON when the simulation finishes.
pub struct JsonTraceLogger {
    filename: String,
    width: usize,
    height: usize,
    initial: Vec<String>,
    round: usize,
    moves: Vec<Move>,
    outcome: Option<Outcome>,
}

#[derive(serde::Serialize)]
struct Move {
    round: usize,
    from: (usize, usize),
    to: Option<(usize, usize)>,
}

impl JsonTraceLogger {
    pub fn new(filename: String) -> JsonTraceLogger {
        JsonTraceLogger {
            filename,
            width: 0,
            height: 0,
            initial: Vec::new(),
            round: 1,
            moves: Vec::new(),
            outcome: None,
        }
    }

    fn save(&self, board: &Board) {
        let file = File::create(&self.filename).unwrap();

        let data = json!({
            "board": {
                "width": self.width,
                "height": self.height,
                "initial": self.initial,
                "final": render_rows(board),
            },
            "moves": self.moves,
            "outcome": self.outcome,
        });

        let mut writer = BufWriter::new(&file);
        serde_json::to_writer_pretty(&mut writer, &data).unwrap();
    }
}

fn render_rows(board: &Board) -> Vec<String> {
    (0..board.height())
        .map(|row| {
            (0..board.width())
                .map(|col| board.get(row, col).to_char())
                .collect()
        })
        .collect()
}

impl Observer for JsonTraceLogger {
    fn on_start(&mut self, board: &Board) {
        self.width = board.width();
        self.height = board.height();
        self.initial = render_rows(board);
    }

    fn on_relocation(&mut self, board: &Board, from: usize, to: Option<usize>) {
        self.moves.push(Move {
            round: self.round,
            from: board.coords(from),
            to: to.map(|index| board.coords(index)),
        });
    }

    fn on_round(&mut self, _board: &Board, round: usize) {
        self.round = round + 1;
    }

    fn on_finish(&mut self, board: &Board, outcome: Outcome) {
        self.outcome = Some(outcome);
        self.save(board);
    }
}
