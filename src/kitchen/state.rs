//! Brew process state: a staged, tick-paced pipeline from ingredients to a
//! finished drink.

use crate::catalog::RecipeKind;

/// Ticks spent pouring each ingredient.
pub const INGREDIENT_TICKS: u32 = 20;
/// Ticks spent on the final heat-and-mix step.
pub const HEATING_TICKS: u32 = 25;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BrewStep {
    /// Pouring ingredient `n` of the recipe's list.
    Ingredient(usize),
    /// Heating and mixing; the last step before the drink is committed.
    Heating,
}

/// An in-flight brew. Purely presentational pacing: no inventory is touched
/// until the final step completes, so cancelling at any point rolls back to
/// the pre-brew state by simply dropping this.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BrewProcess {
    pub recipe: RecipeKind,
    pub step: BrewStep,
    pub ticks_left: u32,
}

impl BrewProcess {
    pub fn new(recipe: RecipeKind) -> Self {
        Self {
            recipe,
            step: BrewStep::Ingredient(0),
            ticks_left: INGREDIENT_TICKS,
        }
    }

    /// Steps in this brew: one per ingredient plus heating.
    pub fn total_steps(&self) -> usize {
        self.recipe.ingredients().len() + 1
    }

    /// Zero-based index of the current step.
    pub fn step_index(&self) -> usize {
        match self.step {
            BrewStep::Ingredient(i) => i,
            BrewStep::Heating => self.recipe.ingredients().len(),
        }
    }

    /// Progress label shown while brewing.
    pub fn step_label(&self) -> String {
        match self.step {
            BrewStep::Ingredient(i) => match self.recipe.ingredients().get(i) {
                Some((seed, amount)) => format!("Adding {} ({}x)...", seed.name(), amount),
                None => String::from("Preparing..."),
            },
            BrewStep::Heating => String::from("Heating and mixing..."),
        }
    }
}
