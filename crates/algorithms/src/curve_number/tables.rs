//! Literal reclassification tables for the Curve Number recipe
//!
//! All tables are flat `(new_value, old_value)` sequences in assign-mode
//! (exact match) convention. The numeric values encode the SCS CN standard
//! table and have no derivable formula; they must not be "simplified".
//!
//! Raw land cover class codes expected in the input raster:
//! 1 tree canopy, 2 grass/shrub, 3 bare soil, 4 water, 5 buildings,
//! 6 roads, 7 other paved, 8 railroads.

/// Normalizes the agriculture mask. Input cells hold {0, 10}; 0 maps to 0
/// and 10 passes through, so agricultural cells contribute +10 in the
/// overlay step and land on the 11-15 entries of [`LAND_COVER_SIMPLIFY`].
pub const AG_NORMALIZE: [(f64, f64); 2] = [(0.0, 0.0), (10.0, 1.0)];

/// Simplifies the agriculture-overlaid land cover into five classes:
/// 1 water, 2 developed, 3 tree canopy, 4 grass/shrub, 5 agriculture.
///
/// Codes 6-8 (roads, other paved, railroads) have no entry and pass
/// through unchanged; the source data never maps agriculture onto them.
pub const LAND_COVER_SIMPLIFY: [(f64, f64); 10] = [
    (3.0, 1.0),
    (4.0, 2.0),
    (2.0, 3.0),
    (1.0, 4.0),
    (2.0, 5.0),
    (5.0, 11.0),
    (5.0, 12.0),
    (5.0, 13.0),
    (5.0, 14.0),
    (5.0, 15.0),
];

/// Maps each of the 20 composite codes (simplified cover x soil group) to
/// its SCS Curve Number.
pub const CN_LOOKUP: [(f64, f64); 20] = [
    (100.0, 1.0),
    (98.0, 2.0),
    (30.0, 3.0),
    (39.0, 4.0),
    (63.0, 5.0),
    (100.0, 10.0),
    (98.0, 20.0),
    (74.0, 30.0),
    (61.0, 40.0),
    (75.0, 50.0),
    (100.0, 100.0),
    (98.0, 200.0),
    (82.0, 300.0),
    (74.0, 400.0),
    (83.0, 500.0),
    (100.0, 1000.0),
    (98.0, 2000.0),
    (86.0, 3000.0),
    (80.0, 4000.0),
    (87.0, 5000.0),
];

/// USDA hydrologic soil group, encoded as a power of ten
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoilGroup {
    /// High infiltration (sand)
    A,
    /// Moderate infiltration
    B,
    /// Slow infiltration
    C,
    /// Very slow infiltration (clay)
    D,
}

impl SoilGroup {
    pub const ALL: [SoilGroup; 4] = [SoilGroup::A, SoilGroup::B, SoilGroup::C, SoilGroup::D];

    /// Raster code for this group
    pub fn code(self) -> i64 {
        match self {
            SoilGroup::A => 1,
            SoilGroup::B => 10,
            SoilGroup::C => 100,
            SoilGroup::D => 1000,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(SoilGroup::A),
            10 => Some(SoilGroup::B),
            100 => Some(SoilGroup::C),
            1000 => Some(SoilGroup::D),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            SoilGroup::A => 'A',
            SoilGroup::B => 'B',
            SoilGroup::C => 'C',
            SoilGroup::D => 'D',
        }
    }
}

/// Simplified land cover class produced by [`LAND_COVER_SIMPLIFY`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoverClass {
    Water,
    Developed,
    Canopy,
    GrassShrub,
    Agriculture,
}

impl CoverClass {
    pub const ALL: [CoverClass; 5] = [
        CoverClass::Water,
        CoverClass::Developed,
        CoverClass::Canopy,
        CoverClass::GrassShrub,
        CoverClass::Agriculture,
    ];

    /// Raster code for this class
    pub fn code(self) -> i64 {
        match self {
            CoverClass::Water => 1,
            CoverClass::Developed => 2,
            CoverClass::Canopy => 3,
            CoverClass::GrassShrub => 4,
            CoverClass::Agriculture => 5,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            CoverClass::Water => "Water",
            CoverClass::Developed => "Developed",
            CoverClass::Canopy => "Tree canopy",
            CoverClass::GrassShrub => "Grass/shrub",
            CoverClass::Agriculture => "Agriculture",
        }
    }
}

/// Composite code for a (cover, soil) pair, as produced by the combine step
pub fn composite_code(cover: CoverClass, soil: SoilGroup) -> i64 {
    cover.code() * soil.code()
}

/// Curve Number for a (cover, soil) pair, straight from [`CN_LOOKUP`]
pub fn curve_number(cover: CoverClass, soil: SoilGroup) -> Option<u8> {
    let code = composite_code(cover, soil) as f64;
    CN_LOOKUP
        .iter()
        .find(|(_, old)| *old == code)
        .map(|(new, _)| *new as u8)
}
