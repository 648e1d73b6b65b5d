//! Locale-style name ordering.
//!
//! Names compare in three passes, as a root-locale collator would:
//! letters with accents and case folded away, then accents, then case with
//! lowercase first. Remaining ties fall back to raw code point order.
//! In the first pass punctuation and symbols rank before digits, and digits
//! before letters.

use crate::model::contact::Contact;
use std::cmp::Ordering;

/// Direction of the name sort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// Returns the opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    pub fn is_ascending(self) -> bool {
        self == Self::Ascending
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// Anything displayed and sorted by a name.
pub trait Named {
    fn name(&self) -> &str;
}

impl Named for Contact {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Returns a stably sorted copy of `items` ordered by name.
pub fn sort_by_name<T: Named + Clone>(items: &[T], direction: SortDirection) -> Vec<T> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| direction.apply(compare_names(a.name(), b.name())));
    sorted
}

/// Case-insensitive, accent-aware name comparison.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    let primary = a
        .chars()
        .flat_map(base_letter)
        .map(primary_weight)
        .cmp(b.chars().flat_map(base_letter).map(primary_weight));
    primary
        .then_with(|| {
            a.chars()
                .flat_map(char::to_lowercase)
                .cmp(b.chars().flat_map(char::to_lowercase))
        })
        .then_with(|| {
            a.chars()
                .map(char::is_uppercase)
                .cmp(b.chars().map(char::is_uppercase))
        })
        .then_with(|| a.cmp(b))
}

fn primary_weight(c: char) -> (u8, char) {
    let class = if c.is_alphabetic() {
        2
    } else if c.is_numeric() {
        1
    } else {
        0
    };
    (class, c)
}

// Lowercased letter with Latin-1 / Latin Extended-A diacritics stripped.
fn base_letter(c: char) -> std::char::ToLowercase {
    let base = match c {
        'À'..='Å' | 'à'..='å' | 'Ā'..='ą' => 'a',
        'Ç' | 'ç' | 'Ć'..='č' => 'c',
        'Ď'..='đ' => 'd',
        'È'..='Ë' | 'è'..='ë' | 'Ē'..='ě' => 'e',
        'Ĝ'..='ģ' => 'g',
        'Ĥ'..='ħ' => 'h',
        'Ì'..='Ï' | 'ì'..='ï' | 'Ĩ'..='ı' => 'i',
        'Ĵ' | 'ĵ' => 'j',
        'Ķ' | 'ķ' => 'k',
        'Ĺ'..='ł' => 'l',
        'Ñ' | 'ñ' | 'Ń'..='ň' => 'n',
        'Ò'..='Ö' | 'Ø' | 'ò'..='ö' | 'ø' | 'Ō'..='ő' => 'o',
        'Ŕ'..='ř' => 'r',
        'Ś'..='š' => 's',
        'Ţ'..='ŧ' => 't',
        'Ù'..='Ü' | 'ù'..='ü' | 'Ũ'..='ų' => 'u',
        'Ŵ' | 'ŵ' => 'w',
        'Ý' | 'ý' | 'ÿ' | 'Ŷ'..='Ÿ' => 'y',
        'Ź'..='ž' => 'z',
        other => other,
    };
    base.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::{compare_names, sort_by_name, SortDirection};
    use crate::model::contact::Contact;
    use std::cmp::Ordering;

    fn contacts(names: &[&str]) -> Vec<Contact> {
        names
            .iter()
            .map(|name| Contact::new(name, "1234567", 0))
            .collect()
    }

    fn names(items: &[Contact]) -> Vec<&str> {
        items.iter().map(|contact| contact.name.as_str()).collect()
    }

    #[test]
    fn ascending_is_case_insensitive() {
        let sorted = sort_by_name(&contacts(&["bob", "Alice", "carol"]), SortDirection::Ascending);
        assert_eq!(names(&sorted), ["Alice", "bob", "carol"]);
    }

    #[test]
    fn descending_reverses_order() {
        let sorted = sort_by_name(&contacts(&["bob", "Alice", "carol"]), SortDirection::Descending);
        assert_eq!(names(&sorted), ["carol", "bob", "Alice"]);
    }

    #[test]
    fn toggle_flips_each_call() {
        let direction = SortDirection::default();
        assert!(direction.is_ascending());
        assert_eq!(direction.toggled(), SortDirection::Descending);
        assert_eq!(direction.toggled().toggled(), SortDirection::Ascending);
    }

    #[test]
    fn accents_sort_with_base_letter() {
        let sorted = sort_by_name(&contacts(&["eve", "Émile", "dan", "fay"]), SortDirection::Ascending);
        assert_eq!(names(&sorted), ["dan", "Émile", "eve", "fay"]);
    }

    #[test]
    fn case_ties_put_lowercase_first() {
        assert_eq!(compare_names("ann", "Ann"), Ordering::Less);
        assert_eq!(compare_names("Ann", "ann"), Ordering::Greater);
        assert_eq!(compare_names("Ann", "Ann"), Ordering::Equal);
        assert_eq!(compare_names("e", "é"), Ordering::Less);
    }

    #[test]
    fn punctuation_and_digits_sort_before_letters() {
        assert_eq!(compare_names("~tilde", "amy"), Ordering::Less);
        assert_eq!(compare_names("{brace}", "Zoe"), Ordering::Less);
        assert_eq!(compare_names("42", "amy"), Ordering::Less);
        assert_eq!(compare_names("~tilde", "42"), Ordering::Less);
        assert_eq!(compare_names("al|ex", "alex"), Ordering::Less);

        let sorted = sort_by_name(
            &contacts(&["zed", "~tilde", "Amy", "42 Club", "{brace}"]),
            SortDirection::Ascending,
        );
        assert_eq!(names(&sorted), ["{brace}", "~tilde", "42 Club", "Amy", "zed"]);
    }

    #[test]
    fn equal_names_keep_insertion_order_in_both_directions() {
        let items = contacts(&["Sam", "Sam", "Amy"]);
        let first_sam = items[0].id;
        let second_sam = items[1].id;

        let ascending = sort_by_name(&items, SortDirection::Ascending);
        assert_eq!(ascending[1].id, first_sam);
        assert_eq!(ascending[2].id, second_sam);

        let descending = sort_by_name(&items, SortDirection::Descending);
        assert_eq!(descending[0].id, first_sam);
        assert_eq!(descending[1].id, second_sam);
    }
}
