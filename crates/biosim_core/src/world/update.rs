//! The four yearly passes.

use super::{World, YearSummary};
use crate::error::Result;
use crate::grid::CellId;
use crate::population::{AnimalId, FeedOutcome, PendingBirth};
use crate::rng::RandomSource;

impl<R: RandomSource> World<R> {
    /// Ages every animal and removes the ones that die.
    pub(super) fn pass_aging_and_death(&mut self, summary: &mut YearSummary) -> Result<()> {
        for id in self.population.ids() {
            self.population.age(id, &self.catalog)?;
            if self
                .population
                .die(id, &mut self.grid, &self.catalog, &mut self.rng)?
            {
                self.population.remove(&mut self.grid, id)?;
                summary.deaths += 1;
            }
        }
        Ok(())
    }

    /// Shuffles the live cells, lets their residents wander and regrows each
    /// cell. Returns the traversal so breeding can reuse it.
    pub(super) fn pass_wander_and_regrowth(
        &mut self,
        summary: &mut YearSummary,
    ) -> Result<Vec<CellId>> {
        let cells = self.grid.live_cells(&mut self.rng);
        for &cell in &cells {
            let residents: Vec<AnimalId> =
                self.grid.cell(cell).residents().iter().copied().collect();
            for id in residents {
                if self
                    .population
                    .wander(id, &mut self.grid, &self.catalog, &mut self.rng)?
                {
                    summary.wandered += 1;
                }
            }
            self.grid.regrow(cell);
        }
        Ok(cells)
    }

    /// Breeds cell by cell, species by species. Newborns join only after the
    /// whole pass, so they never count towards anyone's breeding chance.
    pub(super) fn pass_breeding(
        &mut self,
        cells: &[CellId],
        summary: &mut YearSummary,
    ) -> Result<()> {
        let species: Vec<_> = self.catalog.ids().collect();
        let mut pending: Vec<PendingBirth> = Vec::new();

        for &cell in cells {
            if self.grid.cell(cell).resident_count() == 0 {
                continue;
            }
            for &kind in &species {
                let mut breeders = Vec::new();
                for &id in self.grid.cell(cell).residents() {
                    if self.population.species_of(id)? == kind {
                        breeders.push(id);
                    }
                }
                let same_species = breeders.len();
                for id in breeders {
                    if let Some(birth) =
                        self.population
                            .breed(id, same_species, &self.catalog, &mut self.rng)?
                    {
                        pending.push(birth);
                    }
                }
            }
        }

        for birth in pending {
            if self
                .population
                .spawn_newborn(&mut self.grid, &self.catalog, birth)
                .is_some()
            {
                summary.births += 1;
            }
        }
        Ok(())
    }

    /// Feeds herbivores then predators, each group fittest first.
    pub(super) fn pass_feeding(&mut self, summary: &mut YearSummary) -> Result<()> {
        let mut order: Vec<(AnimalId, bool, f64)> = Vec::with_capacity(self.population.len());
        for id in self.population.ids() {
            let species = self.population.species_of(id)?;
            let fitness = self.population.fitness(id, &self.catalog)?;
            order.push((id, self.catalog.get(species).is_predator(), fitness));
        }
        order.sort_by(|a, b| b.2.total_cmp(&a.2).then_with(|| a.0.cmp(&b.0)));
        // Stable, so fitness order survives within each diet.
        order.sort_by_key(|&(_, predator, _)| predator);

        for (id, _, _) in order {
            // Eaten earlier in this pass.
            if !self.population.contains(id) {
                continue;
            }
            match self
                .population
                .feed(id, &mut self.grid, &self.catalog, &mut self.rng)?
            {
                FeedOutcome::Grazed(_) => summary.herbivores_fed += 1,
                FeedOutcome::Hunted(eaten) => {
                    summary.predators_fed += 1;
                    summary.eaten += eaten.len();
                }
            }
        }
        Ok(())
    }
}
