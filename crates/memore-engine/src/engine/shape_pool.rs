use std::collections::HashSet;

use rand::{Rng, seq::SliceRandom as _};

use crate::core::{GameSettings, PaletteColor, ShapeAppearance, ShapeDescriptor};

/// Random candidate draws allowed before falling back to enumeration.
pub const MAX_DRAW_ATTEMPTS: usize = 500;

/// Result of a pool generation request.
///
/// Holds the newly generated shapes and how many were asked for. A pool is
/// shorter than requested only when the enabled kinds and schemes cannot
/// produce enough distinct appearances; callers are expected to live with the
/// shorter pool and may report [`Self::shortfall`] to the player.
#[derive(Debug, Clone)]
pub struct ShapePool {
    shapes: Vec<ShapeDescriptor>,
    requested: usize,
}

impl ShapePool {
    #[must_use]
    pub fn shapes(&self) -> &[ShapeDescriptor] {
        &self.shapes
    }

    #[must_use]
    pub fn into_shapes(self) -> Vec<ShapeDescriptor> {
        self.shapes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Number of shapes that were asked for.
    #[must_use]
    pub fn requested(&self) -> usize {
        self.requested
    }

    /// Number of requested shapes that could not be produced.
    #[must_use]
    pub fn shortfall(&self) -> usize {
        self.requested - self.shapes.len()
    }

    #[must_use]
    pub fn is_underfilled(&self) -> bool {
        self.shortfall() > 0
    }
}

/// Generates up to `count` new shapes that look different from each other and
/// from every shape in `exclude`.
///
/// Each candidate takes a kind and a scheme uniformly from `settings`, then
/// draws the scheme's colors from the palette without replacement. Duplicate
/// candidates are discarded. After [`MAX_DRAW_ATTEMPTS`] draws, any remaining
/// shortfall is filled by sampling the not-yet-used appearances directly, so
/// the pool holds exactly `min(count, available)` shapes and generation always
/// terminates.
///
/// Shapes in `exclude` are left untouched and their identities are never reused.
///
/// # Example
///
/// ```
/// use memore_engine::{GameSettings, generate_pool};
/// use rand::SeedableRng as _;
/// use rand_pcg::Pcg32;
///
/// let mut rng = Pcg32::seed_from_u64(7);
/// let settings = GameSettings::default();
/// let targets = generate_pool(&mut rng, 3, &settings, &[]);
/// let distractors = generate_pool(&mut rng, 9, &settings, targets.shapes());
///
/// assert_eq!(targets.len(), 3);
/// assert_eq!(distractors.len(), 9);
/// ```
pub fn generate_pool<R>(
    rng: &mut R,
    count: usize,
    settings: &GameSettings,
    exclude: &[ShapeDescriptor],
) -> ShapePool
where
    R: Rng + ?Sized,
{
    let mut used: HashSet<ShapeAppearance> = exclude
        .iter()
        .map(|shape| shape.appearance().clone())
        .collect();
    let mut shapes = Vec::with_capacity(count.min(distinct_appearances(settings)));

    let mut attempts = 0;
    while shapes.len() < count && attempts < MAX_DRAW_ATTEMPTS {
        attempts += 1;
        let candidate = random_appearance(rng, settings);
        if used.insert(candidate.clone()) {
            shapes.push(ShapeDescriptor::new(candidate));
        }
    }

    if shapes.len() < count {
        let unused: Vec<_> = all_appearances(settings)
            .filter(|appearance| !used.contains(appearance))
            .collect();
        let amount = usize::min(count - shapes.len(), unused.len());
        tracing::debug!(
            attempts,
            missing = count - shapes.len(),
            unused = unused.len(),
            "random draws exhausted, sampling remaining appearances"
        );
        shapes.extend(
            rand::seq::index::sample(rng, unused.len(), amount)
                .into_iter()
                .map(|index| ShapeDescriptor::new(unused[index].clone())),
        );
    }

    let pool = ShapePool {
        shapes,
        requested: count,
    };
    if pool.is_underfilled() {
        tracing::warn!(
            requested = count,
            generated = pool.len(),
            excluded = exclude.len(),
            "not enough distinct shapes for the enabled settings"
        );
    }
    pool
}

/// Number of distinct appearances the settings can produce.
///
/// # Example
///
/// ```
/// use memore_engine::{ColoringScheme, GameSettings, ShapeKind, distinct_appearances};
///
/// let settings = GameSettings::new([ShapeKind::Circle], [ColoringScheme::Solid]).unwrap();
/// assert_eq!(distinct_appearances(&settings), 8);
/// ```
#[must_use]
pub fn distinct_appearances(settings: &GameSettings) -> usize {
    let per_kind: usize = settings
        .enabled_schemes()
        .iter()
        .map(|scheme| ordered_color_choices(scheme.color_count()))
        .sum();
    settings.enabled_kinds().len() * per_kind
}

/// Number of ordered selections of `n` distinct palette colors.
fn ordered_color_choices(n: usize) -> usize {
    (PaletteColor::LEN + 1 - n..=PaletteColor::LEN).product()
}

fn random_appearance<R>(rng: &mut R, settings: &GameSettings) -> ShapeAppearance
where
    R: Rng + ?Sized,
{
    let kinds = settings.enabled_kinds();
    let schemes = settings.enabled_schemes();
    let kind = kinds[rng.random_range(0..kinds.len())];
    let scheme = schemes[rng.random_range(0..schemes.len())];

    let mut palette = PaletteColor::ALL;
    let (colors, _) = palette.partial_shuffle(rng, scheme.color_count());
    ShapeAppearance::new_unchecked(kind, scheme, colors)
}

fn all_appearances(settings: &GameSettings) -> impl Iterator<Item = ShapeAppearance> + '_ {
    settings.enabled_kinds().iter().flat_map(move |&kind| {
        settings.enabled_schemes().iter().flat_map(move |&scheme| {
            color_sequences(scheme.color_count())
                .into_iter()
                .map(move |colors| ShapeAppearance::new_unchecked(kind, scheme, &colors))
        })
    })
}

/// Every ordered sequence of `len` distinct palette colors.
fn color_sequences(len: usize) -> Vec<Vec<PaletteColor>> {
    fn extend(prefix: &mut Vec<PaletteColor>, len: usize, out: &mut Vec<Vec<PaletteColor>>) {
        if prefix.len() == len {
            out.push(prefix.clone());
            return;
        }
        for color in PaletteColor::ALL {
            if !prefix.contains(&color) {
                prefix.push(color);
                extend(prefix, len, out);
                prefix.pop();
            }
        }
    }

    let mut out = Vec::with_capacity(ordered_color_choices(len));
    extend(&mut Vec::with_capacity(len), len, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;
    use crate::core::{ColoringScheme, ShapeKind};

    fn assert_all_distinct(shapes: &[ShapeDescriptor]) {
        let appearances: HashSet<_> = shapes.iter().map(ShapeDescriptor::appearance).collect();
        assert_eq!(appearances.len(), shapes.len(), "duplicate appearance in pool");
        let ids: HashSet<_> = shapes.iter().map(ShapeDescriptor::id).collect();
        assert_eq!(ids.len(), shapes.len(), "duplicate id in pool");
    }

    #[test]
    fn test_ordered_color_choices() {
        assert_eq!(ordered_color_choices(1), 8);
        assert_eq!(ordered_color_choices(2), 56);
        assert_eq!(ordered_color_choices(4), 1680);
        assert_eq!(color_sequences(2).len(), 56);
    }

    #[test]
    fn test_distinct_appearances() {
        assert_eq!(
            distinct_appearances(&GameSettings::default()),
            6 * (8 + 56 + 56 + 1680)
        );
        let settings =
            GameSettings::new([ShapeKind::Star, ShapeKind::Square], [ColoringScheme::VerticalHalf])
                .unwrap();
        assert_eq!(distinct_appearances(&settings), 2 * 56);
        assert_eq!(all_appearances(&settings).count(), 2 * 56);
    }

    #[test]
    fn test_pool_has_requested_length_and_is_distinct() {
        let mut rng = Pcg32::seed_from_u64(1);
        let settings = GameSettings::default();
        for count in [0, 1, 3, 12, 48, 200] {
            let pool = generate_pool(&mut rng, count, &settings, &[]);
            assert_eq!(pool.len(), count);
            assert_eq!(pool.requested(), count);
            assert!(!pool.is_underfilled());
            assert_all_distinct(pool.shapes());
        }
    }

    #[test]
    fn test_pool_respects_settings() {
        let mut rng = Pcg32::seed_from_u64(2);
        let settings = GameSettings::new(
            [ShapeKind::Triangle, ShapeKind::Hexagon],
            [ColoringScheme::Solid, ColoringScheme::Quarters],
        )
        .unwrap();
        let pool = generate_pool(&mut rng, 40, &settings, &[]);
        assert_eq!(pool.len(), 40);
        for shape in pool.shapes() {
            assert!(settings.is_kind_enabled(shape.kind()));
            assert!(settings.is_scheme_enabled(shape.scheme()));
            assert_eq!(shape.colors().len(), shape.scheme().color_count());
        }
    }

    #[test]
    fn test_pool_avoids_excluded_appearances() {
        let mut rng = Pcg32::seed_from_u64(3);
        let settings = GameSettings::new(ShapeKind::ALL, [ColoringScheme::Solid]).unwrap();
        let targets = generate_pool(&mut rng, 12, &settings, &[]);
        let distractors = generate_pool(&mut rng, 30, &settings, targets.shapes());
        assert_eq!(distractors.len(), 30);

        let combined: Vec<_> = targets
            .shapes()
            .iter()
            .chain(distractors.shapes())
            .cloned()
            .collect();
        assert_all_distinct(&combined);
    }

    #[test]
    fn test_exhausting_the_space_exactly() {
        let mut rng = Pcg32::seed_from_u64(4);
        let settings = GameSettings::new([ShapeKind::Circle], [ColoringScheme::Solid]).unwrap();
        let pool = generate_pool(&mut rng, 8, &settings, &[]);
        assert_eq!(pool.len(), 8);
        assert_all_distinct(pool.shapes());
    }

    #[test]
    fn test_fallback_fills_large_small_space_request() {
        // 112 appearances: random draws alone rarely find the last few.
        let mut rng = Pcg32::seed_from_u64(5);
        let settings =
            GameSettings::new([ShapeKind::Star, ShapeKind::Square], [ColoringScheme::VerticalHalf])
                .unwrap();
        let pool = generate_pool(&mut rng, 112, &settings, &[]);
        assert_eq!(pool.len(), 112);
        assert_all_distinct(pool.shapes());
    }

    #[test]
    fn test_impossible_request_is_underfilled() {
        let mut rng = Pcg32::seed_from_u64(6);
        let settings = GameSettings::new([ShapeKind::Circle], [ColoringScheme::Solid]).unwrap();
        let pool = generate_pool(&mut rng, 12, &settings, &[]);
        assert_eq!(pool.len(), 8);
        assert_eq!(pool.shortfall(), 4);
        assert!(pool.is_underfilled());

        let more = generate_pool(&mut rng, 5, &settings, pool.shapes());
        assert!(more.is_empty());
        assert_eq!(more.shortfall(), 5);
    }

    #[test]
    fn test_huge_request_returns_every_shape() {
        let mut rng = Pcg32::seed_from_u64(11);
        let settings = GameSettings::new([ShapeKind::Circle], [ColoringScheme::Solid]).unwrap();
        let pool = generate_pool(&mut rng, usize::MAX / 2, &settings, &[]);
        assert_eq!(pool.len(), 8);
        assert_eq!(pool.shortfall(), usize::MAX / 2 - 8);
        assert_all_distinct(pool.shapes());
    }

    #[test]
    fn test_excluded_ids_are_not_reused() {
        let mut rng = Pcg32::seed_from_u64(8);
        let settings = GameSettings::default();
        let first = generate_pool(&mut rng, 10, &settings, &[]);
        let second = generate_pool(&mut rng, 10, &settings, first.shapes());
        for shape in second.shapes() {
            assert!(first.shapes().iter().all(|other| other.id() != shape.id()));
        }
    }

    #[test]
    fn test_same_seed_same_appearances() {
        let settings = GameSettings::default();
        let a = generate_pool(&mut Pcg32::seed_from_u64(9), 20, &settings, &[]);
        let b = generate_pool(&mut Pcg32::seed_from_u64(9), 20, &settings, &[]);
        for (x, y) in a.shapes().iter().zip(b.shapes()) {
            assert!(x.same_appearance(y));
            assert_ne!(x.id(), y.id());
        }
    }
}
