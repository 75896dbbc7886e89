//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// [site] Section Defaults
// ============================================================================

pub mod site {
    use super::super::Env;
    use std::path::PathBuf;

    pub fn env() -> Env {
        Env::Prod
    }

    pub fn prefix() -> String {
        "/io15".into()
    }

    pub fn dir() -> PathBuf {
        "./".into()
    }

    pub fn url() -> Option<String> {
        None
    }
}

// ============================================================================
// [schedule] Section Defaults
// ============================================================================

pub mod schedule {
    use std::path::PathBuf;

    pub fn start() -> String {
        "2015-05-28T09:00:00-07:00".into()
    }

    pub fn timezone() -> String {
        "-07:00".into()
    }

    pub fn data() -> PathBuf {
        "schedule.json".into()
    }
}

// ============================================================================
// [page] Section Defaults
// ============================================================================

pub mod page {
    pub fn title() -> String {
        "Google I/O 2015".into()
    }

    pub fn description() -> String {
        concat!(
            "Google I/O 2015 brings together developers for an immersive,",
            " two-day experience focused on exploring the next generation of ",
            "technology, mobile and beyond. Join us online or in person May 28-29, ",
            "2015. #io15"
        )
        .into()
    }

    pub fn og_image() -> String {
        "images/io15-color.png".into()
    }

    pub fn experiment_description() -> String {
        "Make music with instruments inspired by material design for #io15. Play, record and share."
            .into()
    }

    pub fn experiment_og_image() -> String {
        "images/io15-experiment.png".into()
    }
}
