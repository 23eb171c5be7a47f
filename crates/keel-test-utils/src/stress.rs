//! Reproducible allocation stress runs.
//!
//! A [`StressPlan`] is the request sequence a [`StressConfig`] expands to:
//! sizes and alignments drawn from a seeded [`Xorshift32`]. [`run_stress`]
//! replays a plan against a [`HeaderedBump`], resetting the allocator
//! whenever it fills, and checks every block it gets back.

use keel_core::{is_aligned, Alignment, Xorshift32};

use crate::bump::{BlockHeader, HeaderedBump};
use crate::config::StressConfig;
use crate::error::FixtureError;

/// One allocation request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Request {
    /// Block size in bytes.
    pub size: usize,
    /// Required block alignment.
    pub alignment: Alignment,
}

/// The request sequence for one seed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StressPlan {
    seed: u32,
    requests: Vec<Request>,
}

impl StressPlan {
    /// Expand `config` into its request sequence.
    pub fn generate(config: &StressConfig) -> Result<Self, FixtureError> {
        let alignments = config.validate()?;
        let mut rng = Xorshift32::new(config.seed);
        let requests = (0..config.iterations)
            .map(|_| {
                let size = rng.range(1, config.max_size) as usize;
                let alignment = alignments[rng.bounded(alignments.len() as u32) as usize];
                Request { size, alignment }
            })
            .collect();
        Ok(Self {
            seed: config.seed,
            requests,
        })
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn requests(&self) -> &[Request] {
        &self.requests
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

/// What a stress run did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StressReport {
    /// Successful allocations.
    pub allocations: usize,
    /// Times the allocator filled up and was reset.
    pub resets: usize,
    /// Sum of requested block sizes.
    pub bytes_requested: usize,
    /// Sum of adjustments (alignment padding plus headers).
    pub bytes_overhead: usize,
    /// Highest cursor position reached.
    pub peak_used: usize,
}

impl StressReport {
    /// Overhead as a percentage of all bytes consumed.
    pub fn overhead_percent(&self) -> f32 {
        let total = self.bytes_requested + self.bytes_overhead;
        if total == 0 {
            return 0.0;
        }
        self.bytes_overhead as f32 * 100.0 / total as f32
    }
}

/// Replay the plan for `config` against a fresh [`HeaderedBump`].
///
/// Every returned block is checked for alignment and for a header that
/// reads back what was written.
///
/// # Panics
///
/// Panics if a block comes back misaligned or with a corrupt header.
pub fn run_stress(config: &StressConfig) -> Result<StressReport, FixtureError> {
    let plan = StressPlan::generate(config)?;
    let mut bump = HeaderedBump::new(config.capacity);
    let mut report = StressReport::default();

    for request in plan.requests() {
        let handle = match bump.alloc(request.size, request.alignment) {
            Ok(h) => h,
            Err(FixtureError::OutOfSpace { .. }) => {
                report.peak_used = report.peak_used.max(bump.used());
                bump.reset();
                report.resets += 1;
                // A request that fails on an empty allocator never fits.
                bump.alloc(request.size, request.alignment)?
            }
            Err(e) => return Err(e),
        };

        let address = bump.address(handle)?;
        assert!(
            is_aligned(address, request.alignment.get()),
            "block {handle} at {address:#x} is not {}-aligned",
            request.alignment
        );
        let header = bump.header(handle)?;
        assert_eq!(header.size as usize, request.size, "corrupt header for {handle}");
        assert!(header.adjustment as usize >= BlockHeader::SIZE);

        report.allocations += 1;
        report.bytes_requested += request.size;
        report.bytes_overhead += header.adjustment as usize;
    }
    report.peak_used = report.peak_used.max(bump.used());

    log::debug!(
        "stress seed {}: {} allocations, {} resets, {:.1}% overhead",
        plan.seed(),
        report.allocations,
        report.resets,
        report.overhead_percent()
    );
    Ok(report)
}
