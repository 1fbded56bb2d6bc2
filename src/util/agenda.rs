use std::collections::VecDeque;

/// A container that hands out elements in some strategy-specific order.
pub trait Agenda {
    type Item;

    fn enqueue(&mut self, item: Self::Item);
    fn dequeue(&mut self) -> Option<Self::Item>;
    fn peek_next(&self) -> Option<&Self::Item>;
    fn is_empty(&self) -> bool;
}

/// Last in, first out.  Drives depth-first exploration.
impl<I> Agenda for Vec<I> {
    type Item = I;

    fn enqueue(&mut self, item: Self::Item) {
        self.push(item);
    }

    fn dequeue(&mut self) -> Option<Self::Item> {
        self.pop()
    }

    fn peek_next(&self) -> Option<&Self::Item> {
        self.last()
    }

    fn is_empty(&self) -> bool {
        self.is_empty()
    }
}

/// First in, first out.  Drives breadth-first exploration.
impl<I> Agenda for VecDeque<I> {
    type Item = I;

    fn enqueue(&mut self, item: Self::Item) {
        self.push_back(item);
    }

    fn dequeue(&mut self) -> Option<Self::Item> {
        self.pop_front()
    }

    fn peek_next(&self) -> Option<&Self::Item> {
        self.front()
    }

    fn is_empty(&self) -> bool {
        self.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_agenda_is_lifo() {
        let mut agenda = Vec::new();
        agenda.enqueue(1);
        agenda.enqueue(2);
        assert_eq!(agenda.peek_next(), Some(&2));
        assert_eq!(agenda.dequeue(), Some(2));
        assert_eq!(agenda.dequeue(), Some(1));
        assert_eq!(agenda.dequeue(), None);
    }

    #[test]
    fn vec_deque_agenda_is_fifo() {
        let mut agenda = VecDeque::new();
        agenda.enqueue(1);
        agenda.enqueue(2);
        assert_eq!(agenda.peek_next(), Some(&1));
        assert_eq!(agenda.dequeue(), Some(1));
        assert_eq!(agenda.dequeue(), Some(2));
        assert!(Agenda::is_empty(&agenda));
    }
}
