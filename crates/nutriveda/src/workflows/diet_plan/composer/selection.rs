use rand::seq::SliceRandom;
use rand::Rng;

use super::super::domain::DietaryPreference;
use super::tables::Ingredient;

/// Uniformly sample up to `count` ingredients without replacement, after
/// dropping those the dietary preference excludes.
pub(crate) fn pick<R>(
    pool: &'static [Ingredient],
    count: usize,
    preference: DietaryPreference,
    rng: &mut R,
) -> Vec<&'static str>
where
    R: Rng + ?Sized,
{
    if count == 0 {
        return Vec::new();
    }

    let allowed: Vec<&'static Ingredient> = pool
        .iter()
        .filter(|ingredient| ingredient.allowed_for(preference))
        .collect();

    allowed
        .choose_multiple(rng, count)
        .map(|ingredient| ingredient.name)
        .collect()
}

/// Pick one allowed ingredient whose name is not in `exclude`.
pub(crate) fn pick_new<R>(
    pool: &'static [Ingredient],
    exclude: &[String],
    preference: DietaryPreference,
    rng: &mut R,
) -> Option<&'static str>
where
    R: Rng + ?Sized,
{
    let candidates: Vec<&'static Ingredient> = pool
        .iter()
        .filter(|ingredient| ingredient.allowed_for(preference))
        .filter(|ingredient| !exclude.iter().any(|name| name == ingredient.name))
        .collect();

    candidates.choose(rng).map(|ingredient| ingredient.name)
}
