//! Layered-sphere world generation.
//!
//! [`WorldGenerator`] walks every cell of the cube `[-r, r]^3` in x, y, z order,
//! assigns each cell inside the sphere to a shell material and inserts it
//! through [`VoxelIndex::add`]. Grass cells may sprout a tree, decided by one
//! Bernoulli draw per grass cell from the generator's RNG.
//!
//! Generation can run in one call ([`WorldGenerator::generate`]) or as a
//! resumable [`GenerationPass`] that processes a bounded number of x-slabs per
//! [`step`](GenerationPass::step), for hosts that must keep frames flowing.
//! Both visit cells in the same order and consume the RNG identically.

use globe_voxel::{AddError, BucketCapacities, Category, Coordinate, VoxelIndex};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::seed::world_rng;
use crate::shell::ShellLayout;
use crate::tree::stamp_tree;

/// Default probability that a grass cell grows a tree.
pub const DEFAULT_TREE_PROBABILITY: f64 = 0.05;

// ---------------------------------------------------------------------------
// Settings and report
// ---------------------------------------------------------------------------

/// Generation parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeneratorSettings {
    /// Radius and shell thicknesses.
    pub shells: ShellLayout,
    /// Chance per grass cell of stamping a tree. Values outside `[0, 1]`
    /// behave like the nearest bound.
    pub tree_probability: f64,
}

impl GeneratorSettings {
    /// Settings for a sphere of `radius` with default shells and trees.
    pub fn with_radius(radius: i32) -> Self {
        Self {
            shells: ShellLayout::new(radius),
            tree_probability: DEFAULT_TREE_PROBABILITY,
        }
    }
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self::with_radius(16)
    }
}

/// Outcome counters for one generation pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Voxels placed per category, indexed by [`Category::index`].
    pub placed: [usize; Category::COUNT],
    /// Trees stamped.
    pub trees: usize,
    /// Insertions skipped because the cell was already taken.
    pub occupied: usize,
    /// Insertions rejected because a bucket was full.
    pub rejected_full: usize,
}

impl GenerationReport {
    /// Voxels placed for `category`.
    pub fn placed(&self, category: Category) -> usize {
        self.placed[category.index()]
    }

    /// Voxels placed across all categories.
    pub fn total_placed(&self) -> usize {
        self.placed.iter().sum()
    }
}

/// Whether a pass has more slabs to process.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepStatus {
    /// More slabs remain.
    Pending,
    /// Every slab has been visited.
    Done,
}

// ---------------------------------------------------------------------------
// Generator
// ---------------------------------------------------------------------------

/// Populates a [`VoxelIndex`] with a layered sphere and scattered trees.
pub struct WorldGenerator<R> {
    settings: GeneratorSettings,
    rng: R,
}

impl WorldGenerator<ChaCha8Rng> {
    /// Generator whose tree placement is fully determined by `seed`.
    pub fn from_seed(settings: GeneratorSettings, seed: u64) -> Self {
        Self::new(settings, world_rng(seed))
    }
}

impl<R: Rng> WorldGenerator<R> {
    /// Creates a generator drawing tree decisions from `rng`.
    pub fn new(settings: GeneratorSettings, rng: R) -> Self {
        Self { settings, rng }
    }

    /// Active settings.
    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    /// Starts a resumable pass over the whole cube.
    pub fn pass(&mut self) -> GenerationPass<'_, R> {
        GenerationPass::new(self.settings, &mut self.rng)
    }

    /// Runs a full pass into `index` and returns its report.
    pub fn generate(&mut self, index: &mut VoxelIndex) -> GenerationReport {
        let mut pass = self.pass();
        while pass.step(index, usize::MAX) == StepStatus::Pending {}
        pass.finish()
    }

    /// Builds a fresh index with `capacities` and fills it.
    pub fn build(&mut self, capacities: BucketCapacities) -> (VoxelIndex, GenerationReport) {
        let mut index = VoxelIndex::new(capacities);
        let report = self.generate(&mut index);
        (index, report)
    }
}

// ---------------------------------------------------------------------------
// Pass
// ---------------------------------------------------------------------------

/// A generation run that can be suspended between x-slabs.
pub struct GenerationPass<'g, R> {
    settings: GeneratorSettings,
    rng: &'g mut R,
    /// Next x value to visit; the pass is done once it exceeds the radius.
    next_x: i32,
    report: GenerationReport,
    /// Bucket-full warnings already emitted, one per category per pass.
    warned_full: [bool; Category::COUNT],
}

impl<'g, R: Rng> GenerationPass<'g, R> {
    fn new(settings: GeneratorSettings, rng: &'g mut R) -> Self {
        tracing::debug!(radius = settings.shells.radius, "generation pass started");
        Self {
            settings,
            rng,
            next_x: -settings.shells.radius,
            report: GenerationReport::default(),
            warned_full: [false; Category::COUNT],
        }
    }

    /// Processes up to `max_slabs` x-slabs (at least one).
    pub fn step(&mut self, index: &mut VoxelIndex, max_slabs: usize) -> StepStatus {
        for _ in 0..max_slabs.max(1) {
            if self.is_done() {
                break;
            }
            let x = self.next_x;
            self.slab(index, x);
            self.next_x += 1;
        }

        if self.is_done() {
            StepStatus::Done
        } else {
            StepStatus::Pending
        }
    }

    /// Returns `true` once every slab has been visited.
    pub fn is_done(&self) -> bool {
        self.next_x > self.settings.shells.radius
    }

    /// Fraction of slabs visited, in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        let r = i64::from(self.settings.shells.radius);
        let total = 2 * r + 1;
        if total <= 0 {
            return 1.0;
        }
        let visited = (i64::from(self.next_x) + r).clamp(0, total);
        visited as f32 / total as f32
    }

    /// Counters so far.
    pub fn report(&self) -> &GenerationReport {
        &self.report
    }

    /// Ends the pass and returns its report.
    pub fn finish(self) -> GenerationReport {
        let report = self.report;
        tracing::info!(
            radius = self.settings.shells.radius,
            grass = report.placed(Category::Grass),
            dirt = report.placed(Category::Dirt),
            stone = report.placed(Category::Stone),
            wood = report.placed(Category::Wood),
            leaf = report.placed(Category::Leaf),
            trees = report.trees,
            rejected_full = report.rejected_full,
            "world generated"
        );
        report
    }

    fn slab(&mut self, index: &mut VoxelIndex, x: i32) {
        let r = self.settings.shells.radius;
        for y in -r..=r {
            for z in -r..=r {
                let coord = Coordinate::new(x, y, z);
                let Some(category) = self.settings.shells.classify(coord) else {
                    continue;
                };
                self.place(index, coord, category);
                if category == Category::Grass
                    && self.rng.random::<f64>() < self.settings.tree_probability
                {
                    self.grow_tree(index, coord);
                }
            }
        }
    }

    fn place(&mut self, index: &mut VoxelIndex, coord: Coordinate, category: Category) {
        match index.add(coord, category) {
            Ok(_) => self.report.placed[category.index()] += 1,
            Err(AddError::AlreadyOccupied) => self.report.occupied += 1,
            Err(AddError::BucketFull) => {
                self.report.rejected_full += 1;
                self.warn_full(index, category);
            }
        }
    }

    fn grow_tree(&mut self, index: &mut VoxelIndex, ground: Coordinate) {
        let stamp = stamp_tree(index, ground);
        self.report.trees += 1;
        self.report.placed[Category::Wood.index()] += stamp.wood as usize;
        self.report.placed[Category::Leaf.index()] += stamp.leaves as usize;
        if stamp.rejected_full > 0 {
            self.report.rejected_full += stamp.rejected_full as usize;
            for category in [Category::Wood, Category::Leaf] {
                if index.count(category) >= index.capacity(category) {
                    self.warn_full(index, category);
                }
            }
        }
    }

    fn warn_full(&mut self, index: &VoxelIndex, category: Category) {
        let warned = &mut self.warned_full[category.index()];
        if !*warned {
            *warned = true;
            tracing::warn!(
                %category,
                capacity = index.capacity(category),
                "max instances reached; further cells of this category are skipped"
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
