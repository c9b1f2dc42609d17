use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::Context;
use gumdrop::Options;
use typetutor::commands::process_commands;
use typetutor::corpus::build_from_corpus;

#[derive(Debug, Options)]
struct Args {
    #[options(help = "print help message")]
    help: bool,

    #[options(help = "also print word totals and the most frequent word")]
    stats: bool,

    #[options(free, help = "corpus file followed by command file")]
    files: Vec<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let args = Args::parse_args_default_or_exit();
    let [corpus, commands] = args.files.as_slice() else {
        anyhow::bail!("usage: predict [--stats] <corpus> <commands>");
    };

    let root = build_from_corpus(corpus)
        .with_context(|| format!("building trie from {}", corpus.display()))?;

    if args.stats {
        println!("Distinct words: {}", root.count_words());
        println!("Most Frequent Word: {}", root.most_frequent_word());
    }

    let file = File::open(commands)
        .with_context(|| format!("opening command file {}", commands.display()))?;
    for line in process_commands(&root, BufReader::new(file))? {
        println!("{}", line);
    }
    Ok(())
}
