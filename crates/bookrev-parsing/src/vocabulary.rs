//! Built-in word lists. Read through [`ParsingConfig`](crate::ParsingConfig), never mutated.

/// Words that rarely appear in personal names but often in titles and review jargon.
pub const DEFAULT_STOPWORDS: &[&str] = &[
    "the", "a", "an", "of", "on", "in", "for", "and", "to", "from", "review", "reviews", "book",
    "books", "symposium", "critical", "reflections", "commentary", "response", "reply", "essay",
    "essays", "matter", "body", "special", "is", "what", "how", "why", "case", "against",
    "beyond", "toward", "towards", "between", "introduction", "notes",
];

/// Subject nouns that mark a span as a title fragment unless it also carries an initial.
pub const DEFAULT_TOPIC_NOUNS: &[&str] = &[
    "nature", "ethics", "justice", "ecology", "environmental", "religion", "global", "climate",
    "autonomous", "literature", "engaging", "doing", "cheap", "plant", "animal", "wild",
    "poverty", "growth", "being", "piano", "extinction", "new", "connection", "sustainability",
    "change", "world", "earth", "value", "morality", "resources", "rights", "land", "marxism",
    "stoic", "african", "desiring", "inherent", "intrinsic", "social", "disclosive", "food",
    "people", "moral", "political", "politics", "philosophy", "philosophical", "theory", "reason",
    "mind", "freedom", "democracy", "history", "science", "knowledge", "virtue", "language", "war",
    "god", "matters",
];

/// Substrings that disqualify an item from being a book review.
pub const DEFAULT_EXCLUSION_MARKERS: &[&str] = &[
    "editorial:",
    "announcing",
    "announcement",
    "comment on",
    "response to",
    "reply to",
    "correction",
    "corrigendum",
    "erratum",
    "errata",
    "retraction",
    "call for papers",
    "book notes",
    "books received",
];

/// Publisher names recognized at the tail of a title or author span.
pub const DEFAULT_PUBLISHERS: &[&str] = &[
    "Oxford University Press",
    "Cambridge University Press",
    "Princeton University Press",
    "Harvard University Press",
    "Yale University Press",
    "Columbia University Press",
    "Cornell University Press",
    "University of Chicago Press",
    "MIT Press",
    "The MIT Press",
    "Clarendon Press",
    "Clarendon",
    "Routledge",
    "Wiley-Blackwell",
    "Blackwell",
    "Springer",
    "Palgrave Macmillan",
    "Palgrave",
    "Macmillan",
    "Bloomsbury",
    "Continuum",
    "Polity",
    "Verso",
    "Penguin",
    "W. W. Norton",
    "Norton",
    "Hackett",
    "Open Court",
    "Brill",
    "De Gruyter",
    "Walter de Gruyter",
    "Ashgate",
    "Lexington Books",
    "Rowman & Littlefield",
    "Rowman and Littlefield",
    "SUNY Press",
    "Basic Books",
    "Allen Lane",
    "Allen & Unwin",
    "Allen and Unwin",
    "Humanities Press",
    "Prometheus Books",
    "Kluwer",
    "Elsevier",
    "Academic Press",
    "Edward Elgar",
    "Duckworth",
    "Acumen",
];

/// Imprint cities recognized at the tail of a title or author span.
pub const DEFAULT_CITIES: &[&str] = &[
    "New York",
    "London",
    "Oxford",
    "Cambridge",
    "Princeton",
    "Chicago",
    "Boston",
    "Berlin",
    "Paris",
    "Dordrecht",
    "Amsterdam",
    "Toronto",
    "Montreal",
    "Edinburgh",
    "Malden",
    "Ithaca",
    "New Haven",
    "Lanham",
    "Indianapolis",
    "Albany",
    "Notre Dame",
    "Basingstoke",
    "Aldershot",
    "Abingdon",
    "Durham",
    "Stanford",
    "Berkeley",
    "Minneapolis",
    "Philadelphia",
    "Pittsburgh",
    "Baltimore",
    "Washington",
    "Chichester",
    "Leiden",
    "Frankfurt",
    "Cham",
    "Heidelberg",
    "Milton Keynes",
    "Evanston",
    "Bloomington",
    "Ann Arbor",
    "Atlantic Highlands",
    "Totowa",
    "Hassocks",
    "Brighton",
    "Dublin",
    "Sydney",
    "Melbourne",
];

/// Titles that are section placeholders rather than citations.
pub const GENERIC_PLACEHOLDERS: &[&str] = &[
    "book review",
    "book reviews",
    "book received",
    "books received",
    "book note",
    "book notes",
    "notes on books",
    "review",
    "reviews",
    "short reviews",
    "review article",
    "review essay",
    "critical notice",
    "critical notices",
];
