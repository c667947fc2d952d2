use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use clap::Parser;
use log::info;
use yazar::{
    read_documents, AmbiguityPolicy, FrequencyTable, Normalizer, StopwordProvider, StopwordStage,
};
use yazar_rules::analyzers::LexiconAnalyzer;
use yazar_rules::stopwords::{BuiltinStopwords, StopwordList};
use yazar_rules::tokenizers::UnicodeWordTokenizer;

#[derive(Parser, Debug)]
#[command(about = "A program to count the lemmas and tags of a Turkish corpus.")]
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

    /// The file to write `lemma<TAB>tag<TAB>count` lines to
    #[arg(long, default_value = "word_frequencies.tsv")]
    output: PathBuf,

    /// Which analyses of an ambiguous word are counted. {all, first}
    #[arg(long, default_value = "all")]
    ambiguity: AmbiguityPolicy,

    /// Where stopwords are removed. {surface, lemma, both}
    #[arg(long, default_value = "both")]
    stopword_stage: StopwordStage,
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
    info!("# of documents: {}", documents.len());

    let table = FrequencyTable::aggregate(&normalizer, documents.iter().map(|d| d.text()));
    info!(
        "# of distinct pairs: {}, # of occurrences: {}",
        table.len(),
        table.total()
    );

    info!("Writing {:?} ...", args.output);
    table.save(&args.output)?;

    Ok(())
}
