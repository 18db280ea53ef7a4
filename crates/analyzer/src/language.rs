//! Language ranking over repository primary languages

use crate::{LanguageShare, RepositorySummary};

/// Number of languages reported in the ranked list
pub const TOP_LANGUAGES: usize = 5;

const FALLBACK_COLOR: &str = "#8b5cf6";

/// Display colour for a language, with a neutral fallback
pub fn language_color(language: &str) -> &'static str {
    match language {
        "JavaScript" => "#f1e05a",
        "TypeScript" => "#2b7489",
        "Python" => "#3572A5",
        "Java" => "#b07219",
        "C++" => "#f34b7d",
        "C" => "#555555",
        "C#" => "#239120",
        "PHP" => "#4F5D95",
        "Ruby" => "#701516",
        "Go" => "#00ADD8",
        "Rust" => "#dea584",
        "Swift" => "#ffac45",
        "Kotlin" => "#F18E33",
        "Dart" => "#00B4AB",
        "HTML" => "#e34c26",
        "CSS" => "#1572B6",
        "Shell" => "#89e051",
        "Vue" => "#2c3e50",
        "React" => "#61dafb",
        _ => FALLBACK_COLOR,
    }
}

pub struct LanguageRanker;

impl LanguageRanker {
    /// Rank languages by share of repositories that declare one.
    ///
    /// Repositories without a primary language are left out of the
    /// denominator. Equal percentages keep first-encountered order.
    pub fn rank(repositories: &[RepositorySummary]) -> Vec<LanguageShare> {
        let mut counts: Vec<(&str, u32)> = Vec::new();
        let mut total: u32 = 0;

        for name in repositories
            .iter()
            .filter_map(|r| r.primary_language_name.as_deref())
        {
            match counts.iter_mut().find(|(lang, _)| *lang == name) {
                Some((_, count)) => *count += 1,
                None => counts.push((name, 1)),
            }
            total += 1;
        }

        if total == 0 {
            return Vec::new();
        }

        let mut shares: Vec<LanguageShare> = counts
            .into_iter()
            .map(|(name, count)| LanguageShare {
                name: name.to_string(),
                percentage: ((count as f64 / total as f64) * 100.0).round() as u32,
                color: language_color(name).to_string(),
            })
            .collect();

        // sort_by is stable
        shares.sort_by(|a, b| b.percentage.cmp(&a.percentage));
        shares.truncate(TOP_LANGUAGES);
        shares
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn repos(langs: &[Option<&str>]) -> Vec<RepositorySummary> {
        langs
            .iter()
            .enumerate()
            .map(|(i, lang)| RepositorySummary::new(format!("repo-{}", i), *lang))
            .collect()
    }

    fn names_and_percentages(shares: &[LanguageShare]) -> Vec<(&str, u32)> {
        shares.iter().map(|s| (s.name.as_str(), s.percentage)).collect()
    }

    #[test]
    fn test_language_less_repos_are_excluded_from_denominator() {
        let ranked = LanguageRanker::rank(&repos(&[Some("Go"), Some("Go"), Some("Rust"), None]));
        assert_eq!(names_and_percentages(&ranked), vec![("Go", 67), ("Rust", 33)]);
        assert_eq!(ranked[0].color, "#00ADD8");
    }

    #[test]
    fn test_no_languages_gives_empty_list() {
        assert!(LanguageRanker::rank(&repos(&[None, None])).is_empty());
        assert!(LanguageRanker::rank(&[]).is_empty());
    }

    #[test]
    fn test_ties_keep_first_encountered_order() {
        let ranked = LanguageRanker::rank(&repos(&[
            Some("Python"),
            Some("Rust"),
            Some("Rust"),
            Some("Python"),
            Some("Zig"),
            Some("Go"),
        ]));
        assert_eq!(
            names_and_percentages(&ranked),
            vec![("Python", 33), ("Rust", 33), ("Zig", 17), ("Go", 17)]
        );
        assert_eq!(ranked[2].color, FALLBACK_COLOR);
    }

    #[test]
    fn test_only_top_five_are_returned() {
        let ranked = LanguageRanker::rank(&repos(&[
            Some("A"),
            Some("B"),
            Some("C"),
            Some("D"),
            Some("E"),
            Some("F"),
            Some("F"),
        ]));
        assert_eq!(ranked.len(), TOP_LANGUAGES);
        assert_eq!(ranked[0].name, "F");
        assert!(ranked.iter().all(|s| s.name != "E"));
    }

    #[test]
    fn test_percentages_are_bounded_and_non_increasing() {
        let ranked = LanguageRanker::rank(&repos(&[
            Some("Rust"),
            Some("Go"),
            Some("Rust"),
            Some("TypeScript"),
            None,
            Some("Rust"),
            Some("Go"),
        ]));
        let sum: u32 = ranked.iter().map(|s| s.percentage).sum();
        assert!(sum <= 100, "sum was {}", sum);
        assert!(ranked.iter().all(|s| s.percentage <= 100));
        assert!(ranked.windows(2).all(|w| w[0].percentage >= w[1].percentage));
    }
}
