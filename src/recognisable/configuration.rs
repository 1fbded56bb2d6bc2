use std::cmp::Ordering;
use std::fmt;

/// Configuration of an automaton: the suffix `word` of the input that
/// is still to be read and a storage value `storage`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Configuration<S, T> {
    pub word: Vec<T>,
    pub storage: S,
}

impl<S, T> Configuration<S, T> {
    /// A configuration is *final* when the entire input has been read.
    pub fn is_final(&self) -> bool {
        self.word.is_empty()
    }
}

/// Configurations with less remaining input compare as smaller, so that
/// ordered collections inspect configurations closer to acceptance
/// first.
impl<S: Ord, T: Ord> Ord for Configuration<S, T> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.word.len(), &self.word, &self.storage,).cmp(&(
            other.word.len(),
            &other.word,
            &other.storage,
        ))
    }
}

impl<S: Ord, T: Ord> PartialOrd for Configuration<S, T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S: fmt::Display, T: fmt::Display> fmt::Display for Configuration<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut buffer = String::new();
        let mut word_iter = self.word.iter().peekable();

        while let Some(t) = word_iter.next() {
            buffer.push_str(format!("{}", t).as_str());
            if word_iter.peek().is_some() {
                buffer.push_str(" ");
            }
        }
        write!(f, "word: [{}], {}", buffer, self.storage)
    }
}
