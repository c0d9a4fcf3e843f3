use clap::Parser;

use prunable_tree::{hcat, vcat, Tree, Var};

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Number of `vcat` + `hcat` rounds applied to the initial pair.
    #[arg(long, value_name = "INT", default_value = "1")]
    rounds: usize,

    /// Leaf positions to prune from the final tree.
    #[arg(long, value_name = "POS", value_delimiter = ',', default_value = "0,1,2,3,5")]
    prune: Vec<usize>,

    /// Print every leaf, not just the counts.
    #[arg(long)]
    dump: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Debug,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let time_total = std::time::Instant::now();

    let args = Cli::parse();
    println!("args = {:?}", args);

    let a = Tree::single_path(Some(Var::new(0)), true, 1);
    let b = Tree::single_path(Some(Var::new(0)), false, 1);

    let mut tree = hcat([&a, &b]);
    for round in 1..=args.rounds {
        tree = vcat(&tree, &tree);
        tree = hcat([&tree, &tree]);
        println!("round {}: tree = {:?}", round, tree);
    }

    if args.dump {
        print!("{}", tree);
    }

    tree.prune_leaves(&args.prune)?;
    println!("after pruning {:?}: tree = {:?}", args.prune, tree);
    if args.dump {
        print!("{}", tree);
    }

    tree.check()?;
    assert_eq!(tree.propagated_leaf_assignments(), tree.leaf_assignments());
    println!("assignments covered: {}", tree.assignment_count());

    let time_total = time_total.elapsed();
    println!("All done in {:.3} s", time_total.as_secs_f64());

    Ok(())
}
