use std::fmt::{self, Display};

/// Two-way infinite tape.  Cell `0` holds the first input symbol;
/// cells that were never written read as the blank symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tape<T> {
    negative: Vec<T>,
    nonnegative: Vec<T>,
    blank: T,
}

impl<T> Tape<T>
where
    T: Clone + PartialEq,
{
    pub fn new(input: &[T], blank: T) -> Self {
        Tape {
            negative: Vec::new(),
            nonnegative: input.to_vec(),
            blank,
        }
    }

    pub fn read(&self, position: isize) -> &T {
        let cell = if position < 0 {
            self.negative.get((-position - 1) as usize)
        } else {
            self.nonnegative.get(position as usize)
        };
        cell.unwrap_or(&self.blank)
    }

    pub fn write(&mut self, position: isize, symbol: T) {
        let (half, index) = if position < 0 {
            (&mut self.negative, (-position - 1) as usize)
        } else {
            (&mut self.nonnegative, position as usize)
        };
        if index >= half.len() {
            half.resize(index + 1, self.blank.clone());
        }
        half[index] = symbol;
    }

    /// The cells between the outermost non-blank symbols, in tape
    /// order.  Empty when the whole tape is blank.
    pub fn trimmed(&self) -> Vec<T> {
        let cells: Vec<&T> = self
            .negative
            .iter()
            .rev()
            .chain(self.nonnegative.iter())
            .collect();

        let first = cells.iter().position(|t| **t != self.blank);
        let last = cells.iter().rposition(|t| **t != self.blank);

        match (first, last) {
            (Some(first), Some(last)) => cells[first..=last].iter().cloned().cloned().collect(),
            _ => Vec::new(),
        }
    }
}

impl<T> Display for Tape<T>
where
    T: Clone + PartialEq + Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut cell_iter = self.trimmed().into_iter().peekable();
        write!(f, "[")?;
        while let Some(t) = cell_iter.next() {
            write!(f, "{}", t)?;
            if cell_iter.peek().is_some() {
                write!(f, " ")?;
            }
        }
        write!(f, "]")
    }
}
