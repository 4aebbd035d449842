//! Localization
//!
//! Per-locale translation tables with placeholder substitution.

mod translator;

pub use translator::{LocaleTable, TranslationError, TranslationGroup, Translator};
