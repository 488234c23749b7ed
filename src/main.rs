// stepviz: step-by-step algorithm visualizations in the terminal

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use clap::{Parser, Subcommand};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use stepviz::compilers::binary_search::BinarySearchInput;
use stepviz::compilers::palindrome::PalindromeInput;
use stepviz::compilers::queue::{QueueInput, QueueOp};
use stepviz::compilers::selection_sort::SelectionSortInput;
use stepviz::compilers::sliding_window::SlidingWindowInput;
use stepviz::errors::InputError;
use stepviz::playback::{PlaybackConfig, PlaybackSession, SystemClock};
use stepviz::ui::App;
use stepviz::visualization::{AlgorithmInput, Visualization};

/// Step through classic algorithms one state at a time.
#[derive(Parser)]
#[command(name = "stepviz", about = "Step through classic algorithms one state at a time")]
struct Cli {
    /// Auto-play interval at 1x speed, in milliseconds.
    #[arg(long, global = true, default_value_t = 1000)]
    interval_ms: u64,

    /// Initial speed multiplier.
    #[arg(long, global = true, default_value_t = 1.0)]
    speed: f64,

    /// Write debug logs to this file (the terminal belongs to the UI).
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Print the compiled trace and exit instead of opening the UI.
    #[arg(long, global = true)]
    dump: bool,

    #[command(subcommand)]
    algorithm: Algorithm,
}

/// Available visualizations.
#[derive(Subcommand)]
enum Algorithm {
    /// Binary search for a target in a sorted sequence.
    BinarySearch {
        /// Sorted values, comma separated.
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true,
              default_values_t = vec![2, 5, 8, 12, 16, 23, 38, 56, 72, 91])]
        values: Vec<i64>,

        #[arg(long, allow_hyphen_values = true, default_value_t = 23)]
        target: i64,
    },

    /// Maximum of every window of a fixed size.
    SlidingWindow {
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true,
              default_values_t = vec![1, 3, -1, -3, 5, 3, 6, 7])]
        values: Vec<i64>,

        /// Window size.
        #[arg(short, long, default_value_t = 3)]
        window: usize,
    },

    /// Two pointers checking whether a string is a palindrome.
    Palindrome {
        #[arg(long, default_value = "racecar")]
        text: String,
    },

    /// Selection sort of an array.
    SelectionSort {
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true,
              default_values_t = vec![64, 25, 12, 22, 11])]
        values: Vec<i64>,
    },

    /// Replay of enqueue/dequeue operations on a FIFO queue.
    Queue {
        /// Operations, comma separated: "enqueue 1,dequeue,..."
        #[arg(long, value_delimiter = ',', default_values_t = default_queue_ops())]
        ops: Vec<QueueOp>,
    },
}

fn default_queue_ops() -> Vec<QueueOp> {
    vec![
        QueueOp::Enqueue(1),
        QueueOp::Enqueue(2),
        QueueOp::Enqueue(3),
        QueueOp::Dequeue,
        QueueOp::Enqueue(4),
        QueueOp::Dequeue,
        QueueOp::Dequeue,
        QueueOp::Enqueue(5),
    ]
}

fn build_input(algorithm: Algorithm) -> Result<AlgorithmInput, InputError> {
    Ok(match algorithm {
        Algorithm::BinarySearch { values, target } => {
            AlgorithmInput::BinarySearch(BinarySearchInput::new(values, target)?)
        }
        Algorithm::SlidingWindow { values, window } => {
            AlgorithmInput::SlidingWindow(SlidingWindowInput::new(values, window)?)
        }
        Algorithm::Palindrome { text } => AlgorithmInput::Palindrome(PalindromeInput::new(&text)?),
        Algorithm::SelectionSort { values } => {
            AlgorithmInput::SelectionSort(SelectionSortInput::new(values)?)
        }
        Algorithm::Queue { ops } => AlgorithmInput::Queue(QueueInput::new(ops)?),
    })
}

fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .init();
    Ok(())
}

fn dump(viz: &Visualization) {
    println!("{}: {}", viz.title(), viz.input_summary());
    for (ordinal, description) in viz.descriptions().iter().enumerate() {
        println!("{:>4}. {}", ordinal + 1, description);
    }
    if let Some(outcome) = viz.outcome() {
        println!("{}", outcome);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let input = match build_input(cli.algorithm) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("Invalid input: {}", e);
            std::process::exit(1);
        }
    };

    // Compile once, up front
    let visualization = Visualization::compile(input);
    tracing::info!(
        algorithm = visualization.title(),
        steps = visualization.len(),
        "visualization compiled"
    );

    if cli.dump {
        dump(&visualization);
        return Ok(());
    }

    let config = PlaybackConfig {
        base_interval: Duration::from_millis(cli.interval_ms),
        speed: cli.speed,
    };
    let session = PlaybackSession::with_clock(visualization.len(), config, SystemClock)?;

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(visualization, session);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
