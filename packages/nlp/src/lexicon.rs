//! Word lists shared by the tagger and the lemmatizer.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use crate::tagger::PosTag;

/// Irregular verbs as `(base, past, past participle)`.
const IRREGULAR_VERBS: &[(&str, &str, &str)] = &[
    ("arise", "arose", "arisen"),
    ("be", "was", "been"),
    ("beat", "beat", "beaten"),
    ("become", "became", "become"),
    ("begin", "began", "begun"),
    ("bend", "bent", "bent"),
    ("bind", "bound", "bound"),
    ("bite", "bit", "bitten"),
    ("bleed", "bled", "bled"),
    ("blow", "blew", "blown"),
    ("break", "broke", "broken"),
    ("bring", "brought", "brought"),
    ("build", "built", "built"),
    ("buy", "bought", "bought"),
    ("catch", "caught", "caught"),
    ("choose", "chose", "chosen"),
    ("come", "came", "come"),
    ("cost", "cost", "cost"),
    ("cut", "cut", "cut"),
    ("deal", "dealt", "dealt"),
    ("dig", "dug", "dug"),
    ("do", "did", "done"),
    ("draw", "drew", "drawn"),
    ("drink", "drank", "drunk"),
    ("drive", "drove", "driven"),
    ("eat", "ate", "eaten"),
    ("fall", "fell", "fallen"),
    ("feed", "fed", "fed"),
    ("feel", "felt", "felt"),
    ("fight", "fought", "fought"),
    ("find", "found", "found"),
    ("flee", "fled", "fled"),
    ("fly", "flew", "flown"),
    ("forget", "forgot", "forgotten"),
    ("forgive", "forgave", "forgiven"),
    ("freeze", "froze", "frozen"),
    ("get", "got", "gotten"),
    ("give", "gave", "given"),
    ("go", "went", "gone"),
    ("grow", "grew", "grown"),
    ("hang", "hung", "hung"),
    ("have", "had", "had"),
    ("hear", "heard", "heard"),
    ("hide", "hid", "hidden"),
    ("hit", "hit", "hit"),
    ("hold", "held", "held"),
    ("hurt", "hurt", "hurt"),
    ("keep", "kept", "kept"),
    ("know", "knew", "known"),
    ("lay", "laid", "laid"),
    ("lead", "led", "led"),
    ("leave", "left", "left"),
    ("lend", "lent", "lent"),
    ("let", "let", "let"),
    ("lie", "lay", "lain"),
    ("light", "lit", "lit"),
    ("lose", "lost", "lost"),
    ("make", "made", "made"),
    ("mean", "meant", "meant"),
    ("meet", "met", "met"),
    ("mislead", "misled", "misled"),
    ("overcome", "overcame", "overcome"),
    ("pay", "paid", "paid"),
    ("put", "put", "put"),
    ("quit", "quit", "quit"),
    ("read", "read", "read"),
    ("ride", "rode", "ridden"),
    ("ring", "rang", "rung"),
    ("rise", "rose", "risen"),
    ("run", "ran", "run"),
    ("say", "said", "said"),
    ("see", "saw", "seen"),
    ("seek", "sought", "sought"),
    ("sell", "sold", "sold"),
    ("send", "sent", "sent"),
    ("set", "set", "set"),
    ("shake", "shook", "shaken"),
    ("shine", "shone", "shone"),
    ("shoot", "shot", "shot"),
    ("shut", "shut", "shut"),
    ("sing", "sang", "sung"),
    ("sink", "sank", "sunk"),
    ("sit", "sat", "sat"),
    ("sleep", "slept", "slept"),
    ("slide", "slid", "slid"),
    ("speak", "spoke", "spoken"),
    ("spend", "spent", "spent"),
    ("spin", "spun", "spun"),
    ("spread", "spread", "spread"),
    ("stand", "stood", "stood"),
    ("steal", "stole", "stolen"),
    ("stick", "stuck", "stuck"),
    ("sting", "stung", "stung"),
    ("strike", "struck", "struck"),
    ("swear", "swore", "sworn"),
    ("swim", "swam", "swum"),
    ("swing", "swung", "swung"),
    ("take", "took", "taken"),
    ("teach", "taught", "taught"),
    ("tear", "tore", "torn"),
    ("tell", "told", "told"),
    ("think", "thought", "thought"),
    ("throw", "threw", "thrown"),
    ("understand", "understood", "understood"),
    ("undertake", "undertook", "undertaken"),
    ("wake", "woke", "woken"),
    ("wear", "wore", "worn"),
    ("win", "won", "won"),
    ("withdraw", "withdrew", "withdrawn"),
    ("write", "wrote", "written"),
];

/// Inflected forms outside the past/participle table.
const IRREGULAR_VERB_FORMS: &[(&str, &str, PosTag)] = &[
    ("am", "be", PosTag::VerbPresent),
    ("are", "be", PosTag::VerbPresent),
    ("is", "be", PosTag::VerbThirdPerson),
    ("were", "be", PosTag::VerbPast),
    ("being", "be", PosTag::VerbGerund),
    ("has", "have", PosTag::VerbThirdPerson),
    ("having", "have", PosTag::VerbGerund),
    ("does", "do", PosTag::VerbThirdPerson),
    ("goes", "go", PosTag::VerbThirdPerson),
    ("dying", "die", PosTag::VerbGerund),
    ("lying", "lie", PosTag::VerbGerund),
    ("tying", "tie", PosTag::VerbGerund),
];

/// Regular verbs whose base form is more often a verb than a noun.
const VERB_BASES: &[&str] = &[
    "accept", "achieve", "add", "agree", "allow", "appear", "apply", "approach", "argue",
    "arrive", "ask", "assume", "avoid", "believe", "belong", "bleed", "breed", "call", "carry",
    "cause", "celebrate", "change", "collect", "complete", "consider", "contain", "continue",
    "create", "decide", "describe", "destroy", "develop", "die", "disappear", "discover",
    "emerge", "enable", "encourage", "enjoy", "ensure", "enter", "establish", "exceed",
    "exist", "expect", "explain", "feed", "finish", "follow", "happen", "heed", "help",
    "identify", "imagine", "improve", "include", "increase", "indicate", "introduce", "involve",
    "join", "kill", "launch", "learn", "like", "listen", "live", "love", "manage", "marry",
    "master", "move", "need", "notice", "obtain", "occur", "offer", "open", "organise",
    "organize", "own", "perform", "persist", "play", "prefer", "prepare", "prevent",
    "proceed", "produce", "prove", "provide", "pull", "pursue", "push", "quit", "reach",
    "realise", "realize", "receive", "recognise", "recognize", "reduce", "relate", "remain",
    "remember", "remove", "represent", "require", "return", "reveal", "save", "seem",
    "separate", "settle", "share", "show", "spend", "start", "stay", "stop",
    "stretch", "struggle", "succeed", "suffer", "suggest", "suppose", "survive", "talk",
    "tend", "try", "turn", "use", "wait", "walk", "want", "watch", "wish", "wonder", "work",
    "worry",
];

/// Irregular plurals as `(plural, singular)`.
const IRREGULAR_NOUNS: &[(&str, &str)] = &[
    ("alumni", "alumnus"),
    ("analyses", "analysis"),
    ("cacti", "cactus"),
    ("calves", "calf"),
    ("children", "child"),
    ("crises", "crisis"),
    ("criteria", "criterion"),
    ("data", "datum"),
    ("feet", "foot"),
    ("fungi", "fungus"),
    ("geese", "goose"),
    ("halves", "half"),
    ("indices", "index"),
    ("knives", "knife"),
    ("leaves", "leaf"),
    ("lice", "louse"),
    ("lives", "life"),
    ("loaves", "loaf"),
    ("matrices", "matrix"),
    ("men", "man"),
    ("mice", "mouse"),
    ("oxen", "ox"),
    ("people", "person"),
    ("phenomena", "phenomenon"),
    ("shelves", "shelf"),
    ("teeth", "tooth"),
    ("theses", "thesis"),
    ("thieves", "thief"),
    ("wives", "wife"),
    ("wolves", "wolf"),
    ("women", "woman"),
];

/// Closed-class and high-frequency words with a fixed tag.
const FIXED_TAGS: &[(&str, PosTag)] = &[
    ("a", PosTag::Determiner),
    ("an", PosTag::Determiner),
    ("the", PosTag::Determiner),
    ("this", PosTag::Determiner),
    ("that", PosTag::Determiner),
    ("these", PosTag::Determiner),
    ("those", PosTag::Determiner),
    ("every", PosTag::Determiner),
    ("each", PosTag::Determiner),
    ("some", PosTag::Determiner),
    ("any", PosTag::Determiner),
    ("no", PosTag::Determiner),
    ("another", PosTag::Determiner),
    ("all", PosTag::Determiner),
    ("both", PosTag::Determiner),
    ("either", PosTag::Determiner),
    ("neither", PosTag::Determiner),
    ("about", PosTag::Preposition),
    ("above", PosTag::Preposition),
    ("across", PosTag::Preposition),
    ("after", PosTag::Preposition),
    ("against", PosTag::Preposition),
    ("along", PosTag::Preposition),
    ("although", PosTag::Preposition),
    ("among", PosTag::Preposition),
    ("around", PosTag::Preposition),
    ("as", PosTag::Preposition),
    ("at", PosTag::Preposition),
    ("because", PosTag::Preposition),
    ("before", PosTag::Preposition),
    ("behind", PosTag::Preposition),
    ("below", PosTag::Preposition),
    ("beneath", PosTag::Preposition),
    ("between", PosTag::Preposition),
    ("beyond", PosTag::Preposition),
    ("by", PosTag::Preposition),
    ("despite", PosTag::Preposition),
    ("down", PosTag::Preposition),
    ("during", PosTag::Preposition),
    ("for", PosTag::Preposition),
    ("from", PosTag::Preposition),
    ("if", PosTag::Preposition),
    ("in", PosTag::Preposition),
    ("into", PosTag::Preposition),
    ("near", PosTag::Preposition),
    ("of", PosTag::Preposition),
    ("off", PosTag::Preposition),
    ("on", PosTag::Preposition),
    ("out", PosTag::Preposition),
    ("over", PosTag::Preposition),
    ("since", PosTag::Preposition),
    ("than", PosTag::Preposition),
    ("through", PosTag::Preposition),
    ("toward", PosTag::Preposition),
    ("towards", PosTag::Preposition),
    ("under", PosTag::Preposition),
    ("until", PosTag::Preposition),
    ("up", PosTag::Preposition),
    ("upon", PosTag::Preposition),
    ("via", PosTag::Preposition),
    ("whether", PosTag::Preposition),
    ("while", PosTag::Preposition),
    ("with", PosTag::Preposition),
    ("within", PosTag::Preposition),
    ("without", PosTag::Preposition),
    ("and", PosTag::Conjunction),
    ("but", PosTag::Conjunction),
    ("or", PosTag::Conjunction),
    ("nor", PosTag::Conjunction),
    ("yet", PosTag::Conjunction),
    ("i", PosTag::Pronoun),
    ("me", PosTag::Pronoun),
    ("you", PosTag::Pronoun),
    ("he", PosTag::Pronoun),
    ("him", PosTag::Pronoun),
    ("she", PosTag::Pronoun),
    ("her", PosTag::Pronoun),
    ("it", PosTag::Pronoun),
    ("we", PosTag::Pronoun),
    ("us", PosTag::Pronoun),
    ("they", PosTag::Pronoun),
    ("them", PosTag::Pronoun),
    ("myself", PosTag::Pronoun),
    ("yourself", PosTag::Pronoun),
    ("himself", PosTag::Pronoun),
    ("herself", PosTag::Pronoun),
    ("itself", PosTag::Pronoun),
    ("ourselves", PosTag::Pronoun),
    ("themselves", PosTag::Pronoun),
    ("everybody", PosTag::Noun),
    ("my", PosTag::PossessivePronoun),
    ("your", PosTag::PossessivePronoun),
    ("his", PosTag::PossessivePronoun),
    ("its", PosTag::PossessivePronoun),
    ("our", PosTag::PossessivePronoun),
    ("their", PosTag::PossessivePronoun),
    ("what", PosTag::WhWord),
    ("which", PosTag::WhWord),
    ("who", PosTag::WhWord),
    ("whom", PosTag::WhWord),
    ("whose", PosTag::WhWord),
    ("when", PosTag::WhWord),
    ("where", PosTag::WhWord),
    ("why", PosTag::WhWord),
    ("how", PosTag::WhWord),
    ("can", PosTag::Modal),
    ("could", PosTag::Modal),
    ("will", PosTag::Modal),
    ("would", PosTag::Modal),
    ("shall", PosTag::Modal),
    ("should", PosTag::Modal),
    ("may", PosTag::Modal),
    ("might", PosTag::Modal),
    ("must", PosTag::Modal),
    ("to", PosTag::To),
    ("there", PosTag::Existential),
    ("not", PosTag::Adverb),
    ("very", PosTag::Adverb),
    ("too", PosTag::Adverb),
    ("also", PosTag::Adverb),
    ("just", PosTag::Adverb),
    ("now", PosTag::Adverb),
    ("then", PosTag::Adverb),
    ("here", PosTag::Adverb),
    ("often", PosTag::Adverb),
    ("always", PosTag::Adverb),
    ("never", PosTag::Adverb),
    ("sometimes", PosTag::Adverb),
    ("again", PosTag::Adverb),
    ("still", PosTag::Adverb),
    ("already", PosTag::Adverb),
    ("soon", PosTag::Adverb),
    ("once", PosTag::Adverb),
    ("only", PosTag::Adverb),
    ("even", PosTag::Adverb),
    ("almost", PosTag::Adverb),
    ("quite", PosTag::Adverb),
    ("rather", PosTag::Adverb),
    ("ahead", PosTag::Adverb),
    ("away", PosTag::Adverb),
    ("back", PosTag::Adverb),
    ("further", PosTag::Adverb),
    ("somehow", PosTag::Adverb),
    ("so", PosTag::Adverb),
    ("one", PosTag::Number),
    ("two", PosTag::Number),
    ("three", PosTag::Number),
    ("four", PosTag::Number),
    ("five", PosTag::Number),
    ("six", PosTag::Number),
    ("seven", PosTag::Number),
    ("eight", PosTag::Number),
    ("nine", PosTag::Number),
    ("ten", PosTag::Number),
    ("eleven", PosTag::Number),
    ("twelve", PosTag::Number),
    ("twenty", PosTag::Number),
    ("thirty", PosTag::Number),
    ("hundred", PosTag::Number),
    ("thousand", PosTag::Number),
    ("million", PosTag::Number),
    ("billion", PosTag::Number),
    ("yes", PosTag::Interjection),
    ("oh", PosTag::Interjection),
    ("ok", PosTag::Interjection),
    ("better", PosTag::AdjectiveComparative),
    ("worse", PosTag::AdjectiveComparative),
    ("more", PosTag::AdjectiveComparative),
    ("less", PosTag::AdjectiveComparative),
    ("best", PosTag::AdjectiveSuperlative),
    ("worst", PosTag::AdjectiveSuperlative),
    ("most", PosTag::AdjectiveSuperlative),
    ("least", PosTag::AdjectiveSuperlative),
    ("greatest", PosTag::AdjectiveSuperlative),
    ("toughest", PosTag::AdjectiveSuperlative),
    ("able", PosTag::Adjective),
    ("bad", PosTag::Adjective),
    ("big", PosTag::Adjective),
    ("blue", PosTag::Adjective),
    ("bright", PosTag::Adjective),
    ("certain", PosTag::Adjective),
    ("clear", PosTag::Adjective),
    ("damp", PosTag::Adjective),
    ("different", PosTag::Adjective),
    ("difficult", PosTag::Adjective),
    ("early", PosTag::Adjective),
    ("easy", PosTag::Adjective),
    ("few", PosTag::Adjective),
    ("first", PosTag::Adjective),
    ("free", PosTag::Adjective),
    ("full", PosTag::Adjective),
    ("good", PosTag::Adjective),
    ("great", PosTag::Adjective),
    ("hard", PosTag::Adjective),
    ("heavy", PosTag::Adjective),
    ("high", PosTag::Adjective),
    ("important", PosTag::Adjective),
    ("joint", PosTag::Adjective),
    ("large", PosTag::Adjective),
    ("last", PosTag::Adjective),
    ("little", PosTag::Adjective),
    ("long", PosTag::Adjective),
    ("main", PosTag::Adjective),
    ("many", PosTag::Adjective),
    ("much", PosTag::Adjective),
    ("new", PosTag::Adjective),
    ("next", PosTag::Adjective),
    ("old", PosTag::Adjective),
    ("other", PosTag::Adjective),
    ("own", PosTag::Adjective),
    ("permanent", PosTag::Adjective),
    ("real", PosTag::Adjective),
    ("recent", PosTag::Adjective),
    ("red", PosTag::Adjective),
    ("right", PosTag::Adjective),
    ("same", PosTag::Adjective),
    ("several", PosTag::Adjective),
    ("severe", PosTag::Adjective),
    ("sharp", PosTag::Adjective),
    ("short", PosTag::Adjective),
    ("small", PosTag::Adjective),
    ("strong", PosTag::Adjective),
    ("sure", PosTag::Adjective),
    ("thick", PosTag::Adjective),
    ("tough", PosTag::Adjective),
    ("tricky", PosTag::Adjective),
    ("true", PosTag::Adjective),
    ("whole", PosTag::Adjective),
    ("young", PosTag::Adjective),
];

/// Words ending in `-ing` that are nouns, not gerunds.
pub(crate) const ING_NOUNS: &[&str] = &[
    "anything", "ceiling", "evening", "everything", "king", "morning", "nothing", "ring",
    "something", "spring", "string", "thing", "wing",
];

/// Words ending in `-ed` that are not past tense verbs.
pub(crate) const ED_NON_VERBS: &[&str] = &[
    "bed", "hundred", "naked", "need", "red", "sacred", "seed", "shed", "sled", "speed",
    "wicked",
];

/// Words ending in `-ly` that are not adverbs.
pub(crate) const LY_NON_ADVERBS: &[&str] = &[
    "ally", "apply", "belly", "bully", "family", "fly", "italy", "jelly", "july", "rely",
    "reply", "supply",
];

/// Words ending in `-ic` that are nouns.
pub(crate) const IC_NOUNS: &[&str] = &[
    "clinic", "critic", "fabric", "logic", "mechanic", "music", "panic", "republic", "topic",
    "traffic",
];

static FIXED: LazyLock<HashMap<&'static str, PosTag>> =
    LazyLock::new(|| FIXED_TAGS.iter().copied().collect());

static VERB_BASE_SET: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    VERB_BASES
        .iter()
        .copied()
        .chain(IRREGULAR_VERBS.iter().map(|(base, _, _)| *base))
        .collect()
});

/// Irregular inflected verb form -> (base, tag). Bases are not included.
static VERB_FORMS: LazyLock<HashMap<&'static str, (&'static str, PosTag)>> = LazyLock::new(|| {
    let mut forms = HashMap::new();
    for (base, past, participle) in IRREGULAR_VERBS {
        // Participles first so a shared past form ends up tagged as past tense.
        if participle != base {
            forms.insert(*participle, (*base, PosTag::VerbPastParticiple));
        }
        if past != base {
            forms.insert(*past, (*base, PosTag::VerbPast));
        }
    }
    for (form, base, tag) in IRREGULAR_VERB_FORMS {
        forms.insert(*form, (*base, *tag));
    }
    forms
});

static NOUN_PLURALS: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| IRREGULAR_NOUNS.iter().copied().collect());

/// Fixed tag for a closed-class or listed word.
pub(crate) fn fixed_tag(word: &str) -> Option<PosTag> {
    FIXED.get(word).copied()
}

/// Whether `word` is a known verb base form.
pub(crate) fn is_verb_base(word: &str) -> bool {
    VERB_BASE_SET.contains(word)
}

/// Base form and tag of an irregular verb form.
pub(crate) fn irregular_verb(word: &str) -> Option<(&'static str, PosTag)> {
    VERB_FORMS.get(word).copied()
}

/// Singular of an irregular plural.
pub(crate) fn irregular_plural(word: &str) -> Option<&'static str> {
    NOUN_PLURALS.get(word).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn irregular_forms_resolve_to_base() {
        assert_eq!(irregular_verb("ran"), Some(("run", PosTag::VerbPast)));
        assert_eq!(irregular_verb("gone"), Some(("go", PosTag::VerbPastParticiple)));
        assert_eq!(irregular_verb("told"), Some(("tell", PosTag::VerbPast)));
        assert_eq!(irregular_verb("run"), None);
        assert!(is_verb_base("run"));
        assert!(is_verb_base("celebrate"));
    }

    #[test]
    fn irregular_plurals() {
        assert_eq!(irregular_plural("children"), Some("child"));
        assert_eq!(irregular_plural("dogs"), None);
    }
}
