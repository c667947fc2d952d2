use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use clap::{ArgGroup, Parser};
use log::info;
use yazar::{
    attribute, read_documents, AmbiguityPolicy, Classifier, FeatureSpaceBuilder, Normalizer,
    PipelineConfig, SolverType, SplitConfig, SplitStrategy, StopwordProvider, StopwordStage,
};
use yazar_rules::analyzers::LexiconAnalyzer;
use yazar_rules::stopwords::{BuiltinStopwords, StopwordList};
use yazar_rules::tokenizers::UnicodeWordTokenizer;

#[derive(Parser, Debug)]
#[command(
    about = "A program to attribute a Turkish text to one of the authors of a corpus.",
    group = ArgGroup::new("target_input").multiple(false),
)]
struct Args {
    /// A CSV corpus with a `text,author` header (zstd-compressed if it ends with `.zst`)
    #[arg(long)]
    corpus: PathBuf,

    /// A lexicon of `stem<TAB>pos` lines
    #[arg(long)]
    lexicon: PathBuf,

    /// A stopword file with one word per line. The built-in Turkish list is used if omitted.
    #[arg(long)]
    stopwords: Option<PathBuf>,

    /// A file containing the text to attribute
    #[arg(long, group = "target_input")]
    target: Option<PathBuf>,

    /// The text to attribute
    #[arg(long, group = "target_input")]
    target_text: Option<String>,

    /// Which analyses of an ambiguous word contribute lemmas. {all, first}
    #[arg(long, default_value = "all")]
    ambiguity: AmbiguityPolicy,

    /// Where stopwords are removed. {surface, lemma, both}
    #[arg(long, default_value = "both")]
    stopword_stage: StopwordStage,

    /// The fraction of documents held out for evaluation
    #[arg(long, default_value = "0.2")]
    test_ratio: f64,

    /// The seed of the train/evaluation split
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Hold out the same fraction of every author
    #[arg(long)]
    stratify: bool,

    /// Use logarithmic term frequencies
    #[arg(long)]
    sublinear_tf: bool,

    /// Ignore lemmas that appear in fewer documents than this value
    #[arg(long, default_value = "1")]
    min_df: usize,

    /// The epsilon stopping criterion for classifier training
    #[arg(long, default_value = "0.01")]
    eps: f64,

    /// The cost hyperparameter for classifier training
    #[arg(long, default_value = "1.0")]
    cost: f64,

    /// The solver. {0, 1, 2, 3, 4, 5, 6, 7} (see LIBLINEAR documentation for more details)
    #[arg(long, default_value = "0")]
    solver: SolverType,
}

fn open_input(path: &Path) -> Result<Box<dyn Read>, Box<dyn std::error::Error>> {
    let f = File::open(path)?;
    if path.extension().map_or(false, |ext| ext == "zst") {
        Ok(Box::new(zstd::Decoder::new(f)?))
    } else {
        Ok(Box::new(BufReader::new(f)))
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    info!("Loading {:?} ...", args.lexicon);
    let analyzer = LexiconAnalyzer::from_reader(File::open(&args.lexicon)?)?;
    info!("# of stems: {}", analyzer.len());

    let stopwords = match &args.stopwords {
        Some(path) => {
            info!("Loading {path:?} ...");
            StopwordList::from_reader(File::open(path)?)?.stopwords("tr")?
        }
        None => BuiltinStopwords.stopwords("tr")?,
    };
    let normalizer = Normalizer::new(&UnicodeWordTokenizer, &analyzer, stopwords)
        .ambiguity(args.ambiguity)
        .stopword_stage(args.stopword_stage);

    info!("Loading {:?} ...", args.corpus);
    let documents = read_documents(open_input(&args.corpus)?)?;

    let config = PipelineConfig {
        features: FeatureSpaceBuilder::new()
            .sublinear_tf(args.sublinear_tf)
            .min_df(args.min_df),
        split: SplitConfig {
            test_ratio: args.test_ratio,
            seed: args.seed,
            strategy: if args.stratify {
                SplitStrategy::Stratified
            } else {
                SplitStrategy::Shuffled
            },
        },
        classifier: Classifier::new(args.solver)
            .epsilon(args.eps)
            .cost(args.cost),
    };
    let pipeline = attribute(&normalizer, &documents, &config)?;
    println!("accuracy: {:.2}%", pipeline.accuracy() * 100.0);

    let target = if let Some(path) = &args.target {
        let mut text = String::new();
        open_input(path)?.read_to_string(&mut text)?;
        Some(text)
    } else {
        args.target_text
    };
    if target.is_none() {
        info!("No target text is given. Predicting for an empty document.");
    }
    let author = pipeline.predict(&normalizer, target.as_deref())?;
    println!("predicted author: {author}");

    Ok(())
}
