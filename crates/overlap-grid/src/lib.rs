//! Slot grid and heatmap aggregation for Overlap.
//!
//! Pure computation over in-memory event data: no I/O, no errors. Every
//! function here degrades gracefully on partial input (unknown slot keys,
//! empty participant lists) instead of failing.
//!
//! # Modules
//!
//! - [`grid`] -- The (day, hour) slot grid and the slot key format.
//! - [`heatmap`] -- Per-slot counts, per-participant lookup, intensity
//!   scaling, and the render-ready [`Heatmap`].
//!
//! [`Heatmap`]: heatmap::Heatmap

pub mod grid;
pub mod heatmap;

// Re-export primary types at crate root.
pub use grid::{
    FIRST_HOUR, HOURS, HOURS_PER_DAY, LAST_HOUR, MAX_RANGE_DAYS, SlotId, SlotParseError, build_grid,
    days, range_within_limit,
};
pub use heatmap::{Heatmap, HeatmapCell, MIN_INTENSITY, count_by_slot, intensity, my_vote};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation.

    #[test]
    fn export_bindings() {
        use ts_rs::TS;

        let _ = crate::heatmap::HeatmapCell::export_all();
        let _ = crate::heatmap::Heatmap::export_all();
    }
}
