//! Best score persistence
//!
//! A single number in LocalStorage, read once at startup and overwritten only
//! when a finished run beats it.

/// The player's best finished-run score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BestScore {
    value: u64,
}

impl BestScore {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "turboRushHighScore";

    pub fn new(value: u64) -> Self {
        Self { value }
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    /// Offer a finished run's score. Returns true (and updates) only when it
    /// strictly beats the stored best.
    pub fn offer(&mut self, score: u64) -> bool {
        if score > self.value {
            self.value = score;
            true
        } else {
            false
        }
    }

    /// Offer a score and persist it if it is a new best
    pub fn record(&mut self, score: u64) -> bool {
        let improved = self.offer(score);
        if improved {
            log::info!("New best score: {}", score);
            self.save();
        }
        improved
    }

    /// Parse the stored representation (a plain integer)
    pub fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse::<u64>().ok().map(Self::new)
    }

    /// Load the best score from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(raw)) = storage.get_item(Self::STORAGE_KEY) {
                if let Some(best) = Self::parse(&raw) {
                    log::info!("Loaded best score {}", best.value);
                    return best;
                }
                log::warn!("Ignoring unreadable best score {:?}", raw);
            }
        }

        log::info!("No best score found, starting fresh");
        Self::default()
    }

    /// Save the best score to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if storage
                .set_item(Self::STORAGE_KEY, &self.value.to_string())
                .is_err()
            {
                log::warn!("Failed to save best score");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
