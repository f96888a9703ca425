use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::info;
use othello_ai::game::{AlphaBetaSelector, FirstLegalMoveSelector, GameInstance};
use othello_ai::protocol::{parse_request, write_move};
use othello_ai::{Baseline, SearchConfig};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BaselineOpt {
    Zero,
    NegInfinity,
}

impl From<BaselineOpt> for Baseline {
    fn from(opt: BaselineOpt) -> Self {
        match opt {
            BaselineOpt::Zero => Baseline::Zero,
            BaselineOpt::NegInfinity => Baseline::NegInfinity,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "othello-ai", about = "Alpha-beta Othello move selector")]
struct Args {
    /// Request file written by the harness
    #[arg(required_unless_present = "self_play")]
    input: Option<PathBuf>,

    /// File the chosen move is written to
    #[arg(required_unless_present = "self_play")]
    output: Option<PathBuf>,

    /// Plies searched below each candidate move
    #[arg(long, default_value_t = othello_ai::ai::selector::DEFAULT_DEPTH)]
    depth: u8,

    /// Score a candidate must beat to be selected
    #[arg(long, value_enum, default_value_t = BaselineOpt::Zero)]
    baseline: BaselineOpt,

    /// Play the search (black) against a first-legal-move player (white)
    #[arg(long)]
    self_play: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let config = SearchConfig {
        depth: args.depth,
        baseline: args.baseline.into(),
    };

    if args.self_play {
        return self_play(config);
    }

    let (Some(input), Some(output)) = (args.input, args.output) else {
        return Err("input and output paths are required".into());
    };

    let text = fs::read_to_string(&input)?;
    let request = parse_request(&text)?;
    info!(
        "{:?} to move with {} legal moves",
        request.side,
        request.legal_moves.len()
    );

    let mv = request
        .choose(&config)
        .ok_or("request contains no legal moves")?;

    let mut out = BufWriter::new(File::create(&output)?);
    write_move(&mut out, mv)?;
    Ok(())
}

fn self_play(config: SearchConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut game = GameInstance::new(
        Box::new(AlphaBetaSelector::new(config)),
        Box::new(FirstLegalMoveSelector),
    );

    println!("{}", game.board());
    while !game.is_game_over() {
        game.step()?;
        println!("{}", game.board());
    }

    let result = game.to_game_result();
    println!(
        "black {} white {} winner {}",
        result.black_count, result.white_count, result.winner
    );
    Ok(())
}
