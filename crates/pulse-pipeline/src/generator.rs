//! Synthetic post generation.
//!
//! All randomness comes from the caller's generator, so a fixed seed gives a
//! fixed table.

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use pulse_core::{AppConfig, Category, RawPost};
use rand::distr::weighted::WeightedIndex;
use rand::seq::index;
use rand::Rng;
use rand_distr::{Binomial, Distribution, LogNormal};

use crate::error::PipelineError;

/// Categorical distribution of post categories.
const CATEGORY_WEIGHTS: [(Category, f64); 7] = [
    (Category::Fitness, 0.15),
    (Category::Tech, 0.18),
    (Category::Family, 0.14),
    (Category::Food, 0.18),
    (Category::Beauty, 0.12),
    (Category::Finance, 0.13),
    (Category::Travel, 0.10),
];

/// Post bodies, picked independently of category.
const TEMPLATES: [&str; 7] = [
    "Top workout for the week! #fitness #health ❤️",
    "New phone review: battery life is insane. #tech",
    "Family dinner ideas for busy parents. #family #food",
    "10 recipes under 20 minutes. #food #easymeals",
    "Skincare routine that works. #beauty",
    "Stock market basics: how to start investing. #finance",
    "Hidden travel gems for 2025. #travel",
];

const EXTRA_TAGS: [&str; 5] = ["fun", "tips", "life", "trending", "news"];

const HASHTAG_PROBABILITY: f64 = 0.6;
const MENTION_PROBABILITY: f64 = 0.7;
const SECONDARY_LANGUAGE_PROBABILITY: f64 = 0.05;
const REPLY_PROBABILITY: f64 = 0.002;
const MIN_IMPRESSIONS: u64 = 50;
const MIN_FOLLOWERS: u64 = 100;

/// Parameters for one generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorParams {
    pub post_count: usize,
    pub window_days: u32,
    pub start: NaiveDateTime,
    pub missing_text: usize,
    pub missing_impressions: usize,
}

impl GeneratorParams {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            post_count: config.post_count,
            window_days: config.window_days,
            start: default_start(),
            missing_text: config.missing_text,
            missing_impressions: config.missing_impressions,
        }
    }
}

/// Midnight, 2025-01-01.
#[must_use]
pub fn default_start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 1)
        .expect("2025-01-01 is a valid date")
        .and_time(chrono::NaiveTime::MIN)
}

fn impressions_mu(category: Category) -> f64 {
    match category {
        Category::Tech | Category::Travel => 7.0,
        _ => 6.2,
    }
}

fn like_probability(category: Category) -> f64 {
    match category {
        Category::Food | Category::Beauty | Category::Family => 0.04,
        _ => 0.03,
    }
}

fn retweet_probability(category: Category) -> f64 {
    match category {
        Category::Tech | Category::Travel => 0.01,
        _ => 0.005,
    }
}

fn distribution_error(distribution: &'static str, e: impl std::fmt::Display) -> PipelineError {
    PipelineError::Distribution {
        distribution,
        reason: e.to_string(),
    }
}

fn binomial<R: Rng + ?Sized>(rng: &mut R, trials: u64, p: f64) -> Result<u64, PipelineError> {
    let dist = Binomial::new(trials, p).map_err(|e| distribution_error("binomial", e))?;
    Ok(dist.sample(rng))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn log_normal_floor<R: Rng + ?Sized>(
    rng: &mut R,
    mu: f64,
    sigma: f64,
) -> Result<u64, PipelineError> {
    let dist = LogNormal::new(mu, sigma).map_err(|e| distribution_error("log-normal", e))?;
    Ok(dist.sample(rng) as u64)
}

fn compose_text<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut text = TEMPLATES[rng.random_range(0..TEMPLATES.len())].to_string();
    if rng.random::<f64>() < HASHTAG_PROBABILITY {
        for _ in 0..rng.random_range(1..=2) {
            text.push_str(" #");
            text.push_str(EXTRA_TAGS[rng.random_range(0..EXTRA_TAGS.len())]);
        }
    }
    if rng.random::<f64>() < MENTION_PROBABILITY {
        text.push_str(&format!(" @brand{}", rng.random_range(1..30)));
    }
    text
}

/// Generate `params.post_count` posts with every field present.
///
/// # Errors
///
/// Returns [`PipelineError::Distribution`] if a sampling distribution cannot
/// be built from its parameters.
pub fn generate_posts<R: Rng + ?Sized>(
    params: &GeneratorParams,
    rng: &mut R,
) -> Result<Vec<RawPost>, PipelineError> {
    let weights = WeightedIndex::new(CATEGORY_WEIGHTS.iter().map(|(_, w)| *w))
        .map_err(|e| distribution_error("categorical", e))?;
    let window_hours = i64::from(params.window_days) * 24;

    let mut posts = Vec::with_capacity(params.post_count);
    for i in 0..params.post_count {
        let category = CATEGORY_WEIGHTS[weights.sample(rng)].0;
        let timestamp = params.start + TimeDelta::hours(rng.random_range(0..window_hours));
        let text = compose_text(rng);
        let impressions =
            log_normal_floor(rng, impressions_mu(category), 1.0)?.max(MIN_IMPRESSIONS);
        let likes = binomial(rng, impressions, like_probability(category))?;
        let retweets = binomial(rng, impressions, retweet_probability(category))?;
        let replies = binomial(rng, impressions, REPLY_PROBABILITY)?;
        let followers_at_post = log_normal_floor(rng, 8.0, 1.2)?.max(MIN_FOLLOWERS);
        let language = if rng.random::<f64>() < SECONDARY_LANGUAGE_PROBABILITY {
            "vi"
        } else {
            "en"
        };

        posts.push(RawPost {
            post_id: format!("post_{}", i + 1),
            timestamp,
            category,
            text: Some(text),
            impressions: Some(impressions),
            likes,
            retweets,
            replies,
            followers_at_post,
            language: language.to_string(),
        });
    }

    tracing::info!(rows = posts.len(), "generated synthetic posts");
    Ok(posts)
}

/// Blank the text of `missing_text` random rows and, independently, the
/// impressions of `missing_impressions` random rows.
///
/// # Errors
///
/// Returns [`PipelineError::MissingCountTooLarge`] if either count exceeds the
/// number of rows.
pub fn inject_missing<R: Rng + ?Sized>(
    posts: &[RawPost],
    missing_text: usize,
    missing_impressions: usize,
    rng: &mut R,
) -> Result<Vec<RawPost>, PipelineError> {
    let rows = posts.len();
    for (field, requested) in [("text", missing_text), ("impressions", missing_impressions)] {
        if requested > rows {
            return Err(PipelineError::MissingCountTooLarge {
                field,
                requested,
                rows,
            });
        }
    }

    let mut out = posts.to_vec();
    for i in index::sample(rng, rows, missing_text) {
        out[i].text = None;
    }
    for i in index::sample(rng, rows, missing_impressions) {
        out[i].impressions = None;
    }

    tracing::info!(missing_text, missing_impressions, "injected missing values");
    Ok(out)
}

/// Generate the full raw table, missing values included.
///
/// # Errors
///
/// Propagates errors from [`generate_posts`] and [`inject_missing`].
pub fn generate<R: Rng + ?Sized>(
    params: &GeneratorParams,
    rng: &mut R,
) -> Result<Vec<RawPost>, PipelineError> {
    let posts = generate_posts(params, rng)?;
    inject_missing(
        &posts,
        params.missing_text,
        params.missing_impressions,
        rng,
    )
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn params(post_count: usize) -> GeneratorParams {
        GeneratorParams {
            post_count,
            window_days: 200,
            start: default_start(),
            missing_text: 8,
            missing_impressions: 6,
        }
    }

    #[test]
    fn category_weights_sum_to_one() {
        let total: f64 = CATEGORY_WEIGHTS.iter().map(|(_, w)| w).sum();
        assert!((total - 1.0).abs() < 1e-9, "weights sum to {total}");
    }

    #[test]
    fn category_weights_cover_every_category_once() {
        for category in Category::ALL {
            let n = CATEGORY_WEIGHTS.iter().filter(|(c, _)| *c == category).count();
            assert_eq!(n, 1, "{category} appears {n} times");
        }
    }

    #[test]
    fn generates_exact_row_count() {
        let mut rng = StdRng::seed_from_u64(42);
        let posts = generate(&params(1200), &mut rng).unwrap();
        assert_eq!(posts.len(), 1200);
    }

    #[test]
    fn same_seed_same_table() {
        let a = generate(&params(300), &mut StdRng::seed_from_u64(42)).unwrap();
        let b = generate(&params(300), &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_seed_different_table() {
        let a = generate(&params(300), &mut StdRng::seed_from_u64(42)).unwrap();
        let b = generate(&params(300), &mut StdRng::seed_from_u64(43)).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn injects_exact_missing_counts() {
        let posts = generate(&params(1200), &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(posts.iter().filter(|p| p.text.is_none()).count(), 8);
        assert_eq!(posts.iter().filter(|p| p.impressions.is_none()).count(), 6);
    }

    #[test]
    fn fields_respect_bounds() {
        let p = params(500);
        let posts = generate_posts(&p, &mut StdRng::seed_from_u64(7)).unwrap();
        let end = p.start + TimeDelta::days(200);
        for (i, post) in posts.iter().enumerate() {
            assert_eq!(post.post_id, format!("post_{}", i + 1));
            let impressions = post.impressions.unwrap();
            assert!(impressions >= MIN_IMPRESSIONS);
            assert!(post.followers_at_post >= MIN_FOLLOWERS);
            assert!(post.likes <= impressions);
            assert!(post.retweets <= impressions);
            assert!(post.replies <= impressions);
            assert!(post.timestamp >= p.start && post.timestamp < end);
            assert!(post.language == "en" || post.language == "vi");
        }
    }

    #[test]
    fn text_is_template_plus_optional_tags_and_mention() {
        let posts = generate_posts(&params(500), &mut StdRng::seed_from_u64(11)).unwrap();
        for post in &posts {
            let text = post.text.as_deref().unwrap();
            let template = TEMPLATES
                .iter()
                .find(|t| text.starts_with(**t))
                .unwrap_or_else(|| panic!("{text:?} does not start with a template"));
            let suffix = &text[template.len()..];
            let tags = suffix.matches(" #").count();
            let mentions = suffix.matches(" @brand").count();
            assert!(tags <= 2, "{text:?} has {tags} extra tags");
            assert!(mentions <= 1, "{text:?} has {mentions} mentions");
        }
    }

    #[test]
    #[allow(clippy::cast_precision_loss)]
    fn tag_and_mention_shares_follow_their_probabilities() {
        let posts = generate_posts(&params(1200), &mut StdRng::seed_from_u64(42)).unwrap();
        let share = |pred: &dyn Fn(&str) -> bool| {
            let hits = posts
                .iter()
                .filter(|p| pred(p.text.as_deref().unwrap()))
                .count();
            hits as f64 / posts.len() as f64
        };
        let mentions = share(&|t: &str| t.contains(" @brand"));
        assert!(
            (0.64..=0.76).contains(&mentions),
            "mention share {mentions} is not near {MENTION_PROBABILITY}"
        );
        let tagged = share(&|t: &str| {
            TEMPLATES
                .iter()
                .find(|tpl| t.starts_with(**tpl))
                .is_some_and(|tpl| t[tpl.len()..].contains(" #"))
        });
        assert!(
            (0.54..=0.66).contains(&tagged),
            "extra-hashtag share {tagged} is not near {HASHTAG_PROBABILITY}"
        );
    }

    #[test]
    fn inject_missing_rejects_oversized_counts() {
        let posts = generate_posts(&params(5), &mut StdRng::seed_from_u64(1)).unwrap();
        let result = inject_missing(&posts, 6, 0, &mut StdRng::seed_from_u64(1));
        assert!(
            matches!(
                result,
                Err(PipelineError::MissingCountTooLarge { field: "text", requested: 6, rows: 5 })
            ),
            "expected MissingCountTooLarge(text), got: {result:?}"
        );
    }

    #[test]
    fn inject_missing_leaves_input_untouched() {
        let posts = generate_posts(&params(50), &mut StdRng::seed_from_u64(3)).unwrap();
        let out = inject_missing(&posts, 50, 50, &mut StdRng::seed_from_u64(3)).unwrap();
        assert!(posts.iter().all(|p| p.text.is_some() && p.impressions.is_some()));
        assert!(out.iter().all(|p| p.text.is_none() && p.impressions.is_none()));
    }
}
