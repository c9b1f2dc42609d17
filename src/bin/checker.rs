use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use gumdrop::Options;
use typetutor::{CheckerConfig, SpellCorrector, SuggestedCorrection};

const QUIT_COMMAND: &str = "-1";

#[derive(Debug, Options)]
struct Args {
    #[options(help = "print help message")]
    help: bool,

    #[options(help = "JSON configuration file")]
    config: Option<PathBuf>,

    #[options(help = "hashed dictionary snapshot (default: dictionary.bin)")]
    snapshot: Option<PathBuf>,

    #[options(help = "text dictionary used when no snapshot exists")]
    dictionary: Option<PathBuf>,

    #[options(help = "maximum edit distance for suggestions")]
    max_distance: Option<usize>,

    #[options(free, help = "words to check instead of reading stdin")]
    words: Vec<String>,
}

fn load_config(args: &Args) -> anyhow::Result<CheckerConfig> {
    let mut config = match &args.config {
        Some(path) => CheckerConfig::from_json_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => CheckerConfig::default(),
    };
    if let Some(snapshot) = &args.snapshot {
        config.snapshot_path = snapshot.clone();
    }
    if let Some(max_distance) = args.max_distance {
        config.max_edit_distance = max_distance;
    }
    Ok(config)
}

/// Whitespace-delimited tokens read lazily from a line-based input.
struct Tokens<R> {
    input: R,
    pending: Vec<String>,
}

impl<R: BufRead> Tokens<R> {
    fn new(input: R) -> Self {
        Tokens {
            input,
            pending: Vec::new(),
        }
    }

    fn next_token(&mut self) -> io::Result<Option<String>> {
        while self.pending.is_empty() {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None); // EOF
            }
            self.pending
                .extend(line.split_whitespace().rev().map(str::to_string));
        }
        Ok(self.pending.pop())
    }
}

/// Prompts for a text dictionary until one can be loaded, then caches its snapshot.
fn build_interactively<R: BufRead>(
    config: &CheckerConfig,
    tokens: &mut Tokens<R>,
) -> anyhow::Result<SpellCorrector> {
    println!("Binary dictionary file not found.");
    loop {
        print!("Please enter the ASCII formatted dictionary file: ");
        io::stdout().flush()?;
        let Some(path) = tokens.next_token()? else {
            anyhow::bail!("no dictionary file given");
        };
        match SpellCorrector::build_and_cache(config, &path) {
            Ok(corrector) => return Ok(corrector),
            Err(e) => {
                log::debug!("{:?}", e);
                println!("ERROR: Could not read file: {}", path);
            }
        }
    }
}

fn open_corrector<R: BufRead>(
    args: &Args,
    config: &CheckerConfig,
    tokens: &mut Tokens<R>,
) -> anyhow::Result<SpellCorrector> {
    if let Some(corrector) = SpellCorrector::load_cached(config)
        .with_context(|| format!("loading snapshot {}", config.snapshot_path.display()))?
    {
        return Ok(corrector);
    }
    match &args.dictionary {
        Some(path) => SpellCorrector::build_and_cache(config, path)
            .with_context(|| format!("loading dictionary {}", path.display())),
        None => build_interactively(config, tokens),
    }
}

fn report(word: &str, correction: &SuggestedCorrection) {
    match correction {
        SuggestedCorrection::Correct => println!("Word \"{}\" is correct.\n", word),
        SuggestedCorrection::Suggestion(suggestion) => println!(
            "Word \"{}\" is incorrect.\n\
             The most similar word found is: \"{}\"\n\
             Edit Distance: {}\n\
             Transformation steps: {}\n",
            word, suggestion.word, suggestion.distance, suggestion.path
        ),
        SuggestedCorrection::NoSuggestions => println!("Word \"{}\" does not exist.\n", word),
    }
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let args = Args::parse_args_default_or_exit();
    let config = load_config(&args)?;

    let mut tokens = Tokens::new(io::stdin().lock());
    let corrector = open_corrector(&args, &config, &mut tokens)?;

    if !args.words.is_empty() {
        let words: Vec<String> = args.words.iter().map(|w| w.to_ascii_lowercase()).collect();
        let corrections = corrector.suggest_word_corrections(&words);
        for (word, correction) in words.iter().zip(&corrections) {
            report(word, correction);
        }
        return Ok(());
    }

    println!("Dictionary has been loaded into the memory.");
    println!("Enter {} to exit the program.", QUIT_COMMAND);

    loop {
        print!("Enter a word: ");
        io::stdout().flush()?;
        let Some(word) = tokens.next_token()? else {
            break;
        };
        if word == QUIT_COMMAND {
            break;
        }

        let word = word.to_ascii_lowercase();
        report(&word, &corrector.suggest_single_word_correction(&word));
    }
    Ok(())
}
