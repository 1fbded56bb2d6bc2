mod configuration;
mod transition;

pub use self::configuration::Configuration;
pub use self::transition::Transition;

/// Something we can `apply` to a storage value.  An instruction may be
/// inapplicable (empty result) or nondeterministic (more than one
/// result).
pub trait Instruction {
    type Storage;

    fn apply(&self, storage: Self::Storage) -> Vec<Self::Storage>;
}
