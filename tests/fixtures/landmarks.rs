//! Real Paris and Rome landmark coordinates (from OpenStreetMap).

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn coords(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }
}

// ============================================================================
// Paris
// ============================================================================

pub const EIFFEL_TOWER: Location = Location::new("Eiffel Tower", 48.8584, 2.2945);
pub const ARC_DE_TRIOMPHE: Location = Location::new("Arc de Triomphe", 48.8738, 2.2950);
pub const MUSEE_DORSAY: Location = Location::new("Musée d'Orsay", 48.8600, 2.3266);
pub const LOUVRE: Location = Location::new("Louvre", 48.8606, 2.3376);
pub const NOTRE_DAME: Location = Location::new("Notre-Dame", 48.8530, 2.3499);
pub const SACRE_COEUR: Location = Location::new("Sacré-Cœur", 48.8867, 2.3431);

pub const PARIS: &[Location] = &[
    EIFFEL_TOWER,
    ARC_DE_TRIOMPHE,
    MUSEE_DORSAY,
    LOUVRE,
    NOTRE_DAME,
    SACRE_COEUR,
];

// ============================================================================
// Rome
// ============================================================================

pub const ROME: &[Location] = &[
    Location::new("Colosseum", 41.8902, 12.4922),
    Location::new("Pantheon", 41.8986, 12.4769),
    Location::new("Trevi Fountain", 41.9009, 12.4833),
    Location::new("Vatican Museums", 41.9065, 12.4536),
];

/// Paris and Rome landmarks interleaved, starting in Paris.
pub fn interleaved(paris: usize, rome: usize) -> Vec<Location> {
    let mut paris_iter = PARIS.iter().take(paris);
    let mut rome_iter = ROME.iter().take(rome);
    let mut out = Vec::new();
    loop {
        let p = paris_iter.next();
        let r = rome_iter.next();
        if p.is_none() && r.is_none() {
            break;
        }
        out.extend(p.cloned());
        out.extend(r.cloned());
    }
    out
}
