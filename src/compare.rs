//! Comparators used to order the report.

use crate::error::DirstatError;
use crate::node::FileRecord;
use icu_collator::{Collator, CollatorOptions};
use std::cmp::Ordering;
use std::str::FromStr;

/// A boxed comparator over two records
pub type Comparator = Box<dyn Fn(&FileRecord, &FileRecord) -> Ordering>;

/// Sort order selected with `--sort`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Keep discovery order
    #[default]
    None,
    /// By name, locale-aware
    Alpha,
    /// By extension
    Exten,
    /// By size, largest first
    Size,
}

impl SortKey {
    /// The comparator implementing this order
    pub fn comparator(self) -> Comparator {
        match self {
            SortKey::None => Box::new(compare_none),
            SortKey::Alpha => Box::new(compare_name),
            SortKey::Exten => Box::new(compare_ext),
            SortKey::Size => Box::new(reverse(compare_size)),
        }
    }
}

impl FromStr for SortKey {
    type Err = DirstatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "alpha" => Ok(SortKey::Alpha),
            "exten" => Ok(SortKey::Exten),
            "size" => Ok(SortKey::Size),
            _ => Err(DirstatError::BadSort(s.to_string())),
        }
    }
}

/// Leaves records where they are
pub fn compare_none(_a: &FileRecord, _b: &FileRecord) -> Ordering {
    Ordering::Equal
}

/// Ascending by size
pub fn compare_size(a: &FileRecord, b: &FileRecord) -> Ordering {
    a.size.cmp(&b.size)
}

/// By full name, locale-aware
pub fn compare_name(a: &FileRecord, b: &FileRecord) -> Ordering {
    collate(&a.name(), &b.name())
}

/// By the text after the last `.` of the file name.
///
/// A name without any `.` is compared by the whole file name, so `Makefile`
/// sorts among extensions as if `Makefile` were one.
pub fn compare_ext(a: &FileRecord, b: &FileRecord) -> Ordering {
    collate(extension(&a.file_name()), extension(&b.file_name()))
}

/// Negates a comparator to get the descending variant
pub fn reverse<F>(compare: F) -> impl Fn(&FileRecord, &FileRecord) -> Ordering
where
    F: Fn(&FileRecord, &FileRecord) -> Ordering,
{
    move |a: &FileRecord, b: &FileRecord| compare(a, b).reverse()
}

fn extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(idx) => &name[idx + 1..],
        None => name,
    }
}

thread_local! {
    /// Root-locale collator, built on first use
    static COLLATOR: Option<Collator> = Collator::try_new(&Default::default(), CollatorOptions::new())
        .map_err(|err| log::warn!("collator unavailable, comparing code points: {err:?}"))
        .ok();
}

/// Unicode collation (root locale, tertiary strength)
fn collate(a: &str, b: &str) -> Ordering {
    COLLATOR.with(|collator| match collator {
        Some(collator) => collator.compare(a, b),
        None => a.cmp(b),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<FileRecord> {
        vec![
            FileRecord::new("b/Zeta.txt", 30),
            FileRecord::new("a/alpha.rs", 500),
            FileRecord::new("c/Makefile", 10),
            FileRecord::new("d/beta.md", 2048),
        ]
    }

    fn names(records: &[FileRecord]) -> Vec<String> {
        records.iter().map(|r| r.name().into_owned()).collect()
    }

    #[test]
    fn test_sort_key_parse() {
        assert_eq!("alpha".parse::<SortKey>().unwrap(), SortKey::Alpha);
        assert_eq!("EXTEN".parse::<SortKey>().unwrap(), SortKey::Exten);
        assert_eq!("Size".parse::<SortKey>().unwrap(), SortKey::Size);
        assert!(matches!(
            "name".parse::<SortKey>(),
            Err(DirstatError::BadSort(v)) if v == "name"
        ));
    }

    #[test]
    fn test_size_sort_is_descending() {
        let mut recs = records();
        recs.sort_unstable_by(SortKey::Size.comparator());
        let sizes: Vec<u64> = recs.iter().map(|r| r.size).collect();
        assert_eq!(sizes, vec![2048, 500, 30, 10]);
    }

    #[test]
    fn test_name_sort_matches_reference() {
        let mut recs = records();
        recs.sort_unstable_by(SortKey::Alpha.comparator());

        let mut expected = names(&records());
        expected.sort_by_key(|n| n.to_lowercase());
        assert_eq!(names(&recs), expected);
    }

    #[test]
    fn test_ext_sort_uses_whole_name_without_dot() {
        let mut recs = records();
        recs.sort_unstable_by(SortKey::Exten.comparator());
        // "Makefile" is compared as its own extension
        assert_eq!(
            names(&recs),
            vec!["c/Makefile", "d/beta.md", "a/alpha.rs", "b/Zeta.txt"]
        );
    }

    #[test]
    fn test_ext_ignores_dots_in_directories() {
        let a = FileRecord::new("v1.2/README", 1);
        let b = FileRecord::new("x/notes.md", 1);
        assert_eq!(compare_ext(&a, &b), Ordering::Greater);
    }

    #[test]
    fn test_none_keeps_order() {
        let mut recs = records();
        recs.sort_by(SortKey::None.comparator());
        assert_eq!(names(&recs), names(&records()));
    }

    #[test]
    fn test_reverse() {
        let small = FileRecord::new("s", 1);
        let big = FileRecord::new("b", 2);
        assert_eq!(compare_size(&small, &big), Ordering::Less);
        assert_eq!(reverse(compare_size)(&small, &big), Ordering::Greater);
        assert_eq!(reverse(compare_size)(&big, &big), Ordering::Equal);
    }

    #[test]
    fn test_collate_case() {
        assert_eq!(collate("apple", "Banana"), Ordering::Less);
        assert_eq!(collate("a", "A"), Ordering::Less);
        assert_eq!(collate("same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_accented_names_sort_with_their_base_letter() {
        let mut recs = vec![
            FileRecord::new("fig.txt", 1),
            FileRecord::new("éclair.txt", 1),
            FileRecord::new("e.txt", 1),
            FileRecord::new("Zucchini.txt", 1),
            FileRecord::new("Ångström.txt", 1),
        ];
        recs.sort_by(SortKey::Alpha.comparator());
        assert_eq!(
            names(&recs),
            vec!["Ångström.txt", "e.txt", "éclair.txt", "fig.txt", "Zucchini.txt"]
        );
    }

    #[test]
    fn test_accented_extensions() {
        let a = FileRecord::new("x.été", 1);
        let b = FileRecord::new("y.fin", 1);
        let c = FileRecord::new("z.ete", 1);
        assert_eq!(compare_ext(&a, &b), Ordering::Less);
        assert_eq!(compare_ext(&c, &a), Ordering::Less);
    }
}
