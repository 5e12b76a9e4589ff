use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;
use clap::Parser;
use log::LevelFilter;
use simple_logger::SimpleLogger;
use avltree::load;
use avltree::menu::Menu;
use avltree::render::{self, render};
use avltree::snapshot::Snapshot;
use avltree::{AvlTree, Error};

#[derive(Debug, Parser)]
#[clap(version, about = "Self-balancing binary search tree of integer keys")]
struct Opts {
    /// Text file of whitespace-separated integer keys, inserted in order
    input: Option<PathBuf>,

    /// Start from a snapshot written earlier with --snapshot
    #[clap(long)]
    restore: Option<PathBuf>,

    /// Write a snapshot of the key set here on exit
    #[clap(long)]
    snapshot: Option<PathBuf>,

    /// Draw the tree after every key loaded from INPUT, not just at the end
    #[clap(long)]
    render_each: bool,

    /// Draw the tree after loading INPUT only if it is at most this tall
    #[clap(long, default_value_t = render::DEFAULT_MAX_HEIGHT)]
    max_render_height: i32,

    /// Skip the interactive menu
    #[clap(long)]
    batch: bool,

    /// Log more (-v info, -vv debug, -vvv trace)
    #[clap(short, long, parse(from_occurrences))]
    verbose: u64,
}

fn log_level(verbose: u64) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn run(opts: Opts) -> Result<(), Error> {
    let mut tree: AvlTree<i64> = match &opts.restore {
        Some(path) => Snapshot::<i64>::read_from(BufReader::new(File::open(path)?))?.into_tree()?,
        None => AvlTree::new(),
    };

    if let Some(path) = &opts.input {
        let keys: Vec<i64> = load::read_file(path)?;
        let render_each = opts.render_each;

        load::insert_all(&mut tree, keys, |tree, key, outcome| {
            if render_each {
                println!("{:?} {}", outcome, key);
                print!("{}", render(tree));
                println!("{}", "-".repeat(74));
            }
        })?;

        if !render_each {
            if render::fits(&tree, opts.max_render_height) {
                print!("{}", render(&tree));
            } else {
                println!("Tree of height {} is too tall to draw; raise --max-render-height to see it", tree.height());
            }
        }
    }

    if !opts.batch {
        let stdin = io::stdin();
        let stdout = io::stdout();
        Menu::new(stdin.lock(), stdout.lock()).run(&mut tree)?;
    }

    if let Some(path) = &opts.snapshot {
        let mut writer = BufWriter::new(File::create(path)?);
        Snapshot::of(&tree).write_to(&mut writer)?;
        writer.flush()?;
    }

    let released: Vec<_> = tree.release().iter().map(|key| key.to_string()).collect();
    println!("Released nodes: {}", released.join(" "));
    Ok(())
}

fn main() {
    let opts = Opts::parse();

    if let Err(e) = SimpleLogger::new().with_level(log_level(opts.verbose)).init() {
        eprintln!("could not start logging: {}", e);
    }
    log::debug!("{:?}", opts);

    if let Err(e) = run(opts) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
