//! Brewing rules: ingredient validation, the staged process, and the
//! all-or-nothing commit.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::catalog::{RecipeKind, SeedKind};

use super::state::{BrewProcess, BrewStep, HEATING_TICKS, INGREDIENT_TICKS};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum BrewError {
    #[error("Not enough ingredients!")]
    MissingIngredients,
    #[error("A brew is already in progress!")]
    BrewInProgress,
    #[error("Nothing is brewing!")]
    NothingBrewing,
}

/// True iff the inventory covers every ingredient of the recipe.
pub fn can_brew(recipe: RecipeKind, herbs: &BTreeMap<SeedKind, u32>) -> bool {
    recipe
        .ingredients()
        .iter()
        .all(|(seed, amount)| herbs.get(seed).copied().unwrap_or(0) >= *amount)
}

/// Begin brewing. At most one brew runs at a time, and the ingredients must
/// be on hand up front; nothing is debited yet.
pub fn start(
    brew: &mut Option<BrewProcess>,
    recipe: RecipeKind,
    herbs: &BTreeMap<SeedKind, u32>,
) -> Result<(), BrewError> {
    if brew.is_some() {
        return Err(BrewError::BrewInProgress);
    }
    if !can_brew(recipe, herbs) {
        return Err(BrewError::MissingIngredients);
    }
    *brew = Some(BrewProcess::new(recipe));
    Ok(())
}

/// Abandon the in-flight brew. No inventory was touched, so clearing the
/// process is the whole rollback.
pub fn cancel(brew: &mut Option<BrewProcess>) -> Result<RecipeKind, BrewError> {
    match brew.take() {
        Some(process) => Ok(process.recipe),
        None => Err(BrewError::NothingBrewing),
    }
}

/// Age the in-flight brew by `delta` ticks. Advances at most one step per
/// call; returns the recipe once the final step finishes, at which point the
/// process is cleared and the caller commits the result.
pub fn tick(brew: &mut Option<BrewProcess>, delta: u32) -> Option<RecipeKind> {
    let process = brew.as_mut()?;
    process.ticks_left = process.ticks_left.saturating_sub(delta);
    if process.ticks_left > 0 {
        return None;
    }

    match process.step {
        BrewStep::Ingredient(i) => {
            if i + 1 < process.recipe.ingredients().len() {
                process.step = BrewStep::Ingredient(i + 1);
                process.ticks_left = INGREDIENT_TICKS;
            } else {
                process.step = BrewStep::Heating;
                process.ticks_left = HEATING_TICKS;
            }
            None
        }
        BrewStep::Heating => {
            let recipe = process.recipe;
            *brew = None;
            Some(recipe)
        }
    }
}

/// Debit the recipe's ingredients, removing entries that reach zero.
/// All-or-nothing: if the inventory no longer covers the recipe, nothing is
/// debited and `false` is returned.
pub fn debit_ingredients(recipe: RecipeKind, herbs: &mut BTreeMap<SeedKind, u32>) -> bool {
    if !can_brew(recipe, herbs) {
        return false;
    }
    for (seed, amount) in recipe.ingredients() {
        if let Some(count) = herbs.get_mut(seed) {
            *count -= amount;
            if *count == 0 {
                herbs.remove(seed);
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn herbs(pairs: &[(SeedKind, u32)]) -> BTreeMap<SeedKind, u32> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn can_brew_requires_every_ingredient() {
        let stock = herbs(&[(SeedKind::Mint, 2)]);
        assert!(can_brew(RecipeKind::MintTea, &stock));
        assert!(!can_brew(RecipeKind::MintTea, &herbs(&[(SeedKind::Mint, 1)])));
        assert!(!can_brew(RecipeKind::HerbalBlend, &stock));
        assert!(can_brew(
            RecipeKind::HerbalBlend,
            &herbs(&[
                (SeedKind::Mint, 1),
                (SeedKind::Lavender, 1),
                (SeedKind::Basil, 1)
            ])
        ));
    }

    #[test]
    fn start_rejects_missing_ingredients() {
        let mut brew = None;
        let stock = herbs(&[(SeedKind::Mint, 1)]);
        assert_eq!(
            start(&mut brew, RecipeKind::MintTea, &stock),
            Err(BrewError::MissingIngredients)
        );
        assert!(brew.is_none());
    }

    #[test]
    fn only_one_brew_at_a_time() {
        let mut brew = None;
        let stock = herbs(&[(SeedKind::Mint, 4)]);
        start(&mut brew, RecipeKind::MintTea, &stock).unwrap();
        assert_eq!(
            start(&mut brew, RecipeKind::MintTea, &stock),
            Err(BrewError::BrewInProgress)
        );
    }

    #[test]
    fn staged_process_reaches_completion() {
        let mut brew = None;
        let stock = herbs(&[(SeedKind::Mint, 2)]);
        start(&mut brew, RecipeKind::MintTea, &stock).unwrap();

        // Pouring the single ingredient.
        assert_eq!(tick(&mut brew, INGREDIENT_TICKS), None);
        assert_eq!(brew.unwrap().step, BrewStep::Heating);
        // Heating finishes the brew.
        assert_eq!(tick(&mut brew, HEATING_TICKS), Some(RecipeKind::MintTea));
        assert!(brew.is_none());
    }

    #[test]
    fn multi_ingredient_brew_steps_through_each() {
        let mut brew = None;
        let stock = herbs(&[
            (SeedKind::Mint, 1),
            (SeedKind::Lavender, 1),
            (SeedKind::Basil, 1),
        ]);
        start(&mut brew, RecipeKind::HerbalBlend, &stock).unwrap();

        assert_eq!(tick(&mut brew, INGREDIENT_TICKS), None);
        assert_eq!(brew.unwrap().step, BrewStep::Ingredient(1));
        assert_eq!(tick(&mut brew, INGREDIENT_TICKS), None);
        assert_eq!(brew.unwrap().step, BrewStep::Ingredient(2));
        assert_eq!(tick(&mut brew, INGREDIENT_TICKS), None);
        assert_eq!(brew.unwrap().step, BrewStep::Heating);
        assert_eq!(
            tick(&mut brew, HEATING_TICKS),
            Some(RecipeKind::HerbalBlend)
        );
    }

    #[test]
    fn small_deltas_accumulate_within_a_step() {
        let mut brew = None;
        let stock = herbs(&[(SeedKind::Mint, 2)]);
        start(&mut brew, RecipeKind::MintTea, &stock).unwrap();
        for _ in 0..INGREDIENT_TICKS - 1 {
            assert_eq!(tick(&mut brew, 1), None);
            assert_eq!(brew.unwrap().step, BrewStep::Ingredient(0));
        }
        tick(&mut brew, 1);
        assert_eq!(brew.unwrap().step, BrewStep::Heating);
    }

    #[test]
    fn cancel_clears_without_side_effects() {
        let mut brew = None;
        let stock = herbs(&[(SeedKind::Mint, 2)]);
        start(&mut brew, RecipeKind::MintTea, &stock).unwrap();
        tick(&mut brew, 5);
        assert_eq!(cancel(&mut brew), Ok(RecipeKind::MintTea));
        assert!(brew.is_none());
        assert_eq!(cancel(&mut brew), Err(BrewError::NothingBrewing));
    }

    #[test]
    fn tick_with_no_brew_is_a_no_op() {
        let mut brew = None;
        assert_eq!(tick(&mut brew, 100), None);
    }

    #[test]
    fn debit_takes_exact_amounts_and_prunes_zeroes() {
        let mut stock = herbs(&[(SeedKind::Mint, 3), (SeedKind::Basil, 1)]);
        assert!(debit_ingredients(RecipeKind::MintTea, &mut stock));
        assert_eq!(stock.get(&SeedKind::Mint), Some(&1));
        assert_eq!(stock.get(&SeedKind::Basil), Some(&1));

        assert!(!debit_ingredients(RecipeKind::MintTea, &mut stock));
        // Failed debit must not partially consume anything.
        assert_eq!(stock.get(&SeedKind::Mint), Some(&1));
        assert_eq!(stock.get(&SeedKind::Basil), Some(&1));

        let mut exact = herbs(&[(SeedKind::Mint, 2)]);
        assert!(debit_ingredients(RecipeKind::MintTea, &mut exact));
        assert!(exact.get(&SeedKind::Mint).is_none());
    }
}
