use yazar::{attribute, Document, FrequencyTable, Normalizer, PipelineConfig, StopwordProvider};
use yazar_rules::analyzers::LexiconAnalyzer;
use yazar_rules::stopwords::BuiltinStopwords;
use yazar_rules::tokenizers::UnicodeWordTokenizer;

const LEXICON: &str = "\
# siyaset
seçim\tNoun
kurul\tNoun
sandık\tNoun
aday\tNoun
parti\tNoun
meclis\tNoun
# kültür
sinema\tNoun
film\tNoun
yönetmen\tNoun
sahne\tNoun
oyuncu\tNoun
roman\tNoun
yüz\tNoun
yüz\tNum
";

fn documents() -> Vec<Document> {
    let x = [
        "Seçimlerde sandıklar ve adaylar",
        "Meclisteki partiler seçimi",
        "Kurulun seçim kararı",
        "Adayların partisi meclise",
        "Sandıkta seçim ve kurul",
    ];
    let y = [
        "Sinemada filmler ve yönetmenler",
        "Sahnedeki oyuncular filmi",
        "Yönetmenin filmi sinemaya",
        "Oyuncunun romanı sahnede",
        "Filmde yönetmen ve oyuncu",
    ];
    let mut documents = vec![];
    for (a, b) in x.iter().zip(&y) {
        documents.push(Document::new(Some(*a), "Uğur Dündar"));
        documents.push(Document::new(Some(*b), "Doğan Hızlan"));
    }
    documents
}

#[test]
fn test_lexicon_normalization() {
    let analyzer = LexiconAnalyzer::from_reader(LEXICON.as_bytes()).unwrap();
    let stopwords = BuiltinStopwords.stopwords("turkish").unwrap();
    let normalizer = Normalizer::new(&UnicodeWordTokenizer, &analyzer, stopwords);
    assert_eq!(
        "seçim sandık aday",
        normalizer.normalize(Some("Seçimlerde sandıklar ve adaylar!"))
    );
    assert_eq!("yüz yüz", normalizer.normalize(Some("YÜZ")));
    assert_eq!("", normalizer.normalize(Some("Bu, çok da güzel.")));
}

#[test]
fn test_attribution_with_lexicon() {
    let analyzer = LexiconAnalyzer::from_reader(LEXICON.as_bytes()).unwrap();
    let stopwords = BuiltinStopwords.stopwords("tr").unwrap();
    let normalizer = Normalizer::new(&UnicodeWordTokenizer, &analyzer, stopwords);
    let documents = documents();

    let pipeline = attribute(&normalizer, &documents, &PipelineConfig::default()).unwrap();
    assert_eq!(&["Doğan Hızlan", "Uğur Dündar"], pipeline.labels().labels());
    assert_eq!(
        "Uğur Dündar",
        pipeline
            .predict(&normalizer, Some("Partilerin adayları seçimde"))
            .unwrap()
    );
    assert_eq!(
        "Doğan Hızlan",
        pipeline
            .predict(&normalizer, Some("Yönetmenlerin filmleri sinemada"))
            .unwrap()
    );
}

#[test]
fn test_frequency_tags() {
    let analyzer = LexiconAnalyzer::from_reader(LEXICON.as_bytes()).unwrap();
    let stopwords = BuiltinStopwords.stopwords("tr").unwrap();
    let normalizer = Normalizer::new(&UnicodeWordTokenizer, &analyzer, stopwords);

    let table = FrequencyTable::aggregate(
        &normalizer,
        [Some("Seçimde seçimde kurul"), None, Some("yüz")],
    );
    assert_eq!(
        vec![
            ("seçim", "[seçim:Noun] seçim:Noun+de:Loc", 2),
            ("kurul", "[kurul:Noun] kurul:Noun", 1),
            ("yüz", "[yüz:Noun] yüz:Noun", 1),
            ("yüz", "[yüz:Num] yüz:Num", 1),
        ],
        table.iter().collect::<Vec<_>>()
    );
    let mut buf = vec![];
    table.write(&mut buf).unwrap();
    assert_eq!(4, String::from_utf8(buf).unwrap().lines().count());
}
