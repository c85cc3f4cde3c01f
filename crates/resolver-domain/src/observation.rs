//! Observation module - the 2x2 awareness frame

/// Category an observation can be filed under
///
/// The wire names (`known`, `knowable_1`, `knowable_2`) are the keys used in
/// persisted snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObservationCategory {
    /// Things the self knows
    Known,

    /// First knowable quadrant (Knowable A)
    KnowableA,

    /// Second knowable quadrant (Knowable B)
    KnowableB,
}

impl ObservationCategory {
    /// Get the category's wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            ObservationCategory::Known => "known",
            ObservationCategory::KnowableA => "knowable_1",
            ObservationCategory::KnowableB => "knowable_2",
        }
    }

    /// Parse a category from its wire name
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "known" => Some(ObservationCategory::Known),
            "knowable_1" => Some(ObservationCategory::KnowableA),
            "knowable_2" => Some(ObservationCategory::KnowableB),
            _ => None,
        }
    }

    /// All storable categories, in display order
    pub fn all() -> &'static [ObservationCategory] {
        &[
            ObservationCategory::Known,
            ObservationCategory::KnowableA,
            ObservationCategory::KnowableB,
        ]
    }
}

impl std::str::FromStr for ObservationCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid observation category: {}", s))
    }
}

/// The four quadrants of the awareness frame
///
/// `Unknown` stands for unexamined blind spots. It has no storage and is
/// always empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quadrant {
    /// Known
    Known,
    /// Knowable A
    KnowableA,
    /// Knowable B
    KnowableB,
    /// Unknown (never populated)
    Unknown,
}

impl Quadrant {
    /// The storable category behind this quadrant, if any
    pub fn category(&self) -> Option<ObservationCategory> {
        match self {
            Quadrant::Known => Some(ObservationCategory::Known),
            Quadrant::KnowableA => Some(ObservationCategory::KnowableA),
            Quadrant::KnowableB => Some(ObservationCategory::KnowableB),
            Quadrant::Unknown => None,
        }
    }
}

impl From<ObservationCategory> for Quadrant {
    fn from(category: ObservationCategory) -> Self {
        match category {
            ObservationCategory::Known => Quadrant::Known,
            ObservationCategory::KnowableA => Quadrant::KnowableA,
            ObservationCategory::KnowableB => Quadrant::KnowableB,
        }
    }
}

/// Observations of one self, one ordered list per category
///
/// Entries keep insertion order and are removed by position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Observations {
    /// Known entries
    pub known: Vec<String>,

    /// Knowable A entries
    pub knowable_1: Vec<String>,

    /// Knowable B entries
    pub knowable_2: Vec<String>,
}

impl Observations {
    /// Entries of one category
    pub fn get(&self, category: ObservationCategory) -> &[String] {
        match category {
            ObservationCategory::Known => &self.known,
            ObservationCategory::KnowableA => &self.knowable_1,
            ObservationCategory::KnowableB => &self.knowable_2,
        }
    }

    /// Mutable entries of one category
    pub fn get_mut(&mut self, category: ObservationCategory) -> &mut Vec<String> {
        match category {
            ObservationCategory::Known => &mut self.known,
            ObservationCategory::KnowableA => &mut self.knowable_1,
            ObservationCategory::KnowableB => &mut self.knowable_2,
        }
    }

    /// Entries shown in a quadrant; `Unknown` is always empty
    pub fn in_quadrant(&self, quadrant: Quadrant) -> &[String] {
        match quadrant.category() {
            Some(category) => self.get(category),
            None => &[],
        }
    }

    /// Total number of entries across all categories
    pub fn len(&self) -> usize {
        self.known.len() + self.knowable_1.len() + self.knowable_2.len()
    }

    /// Whether every category is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
