//! Debugging feature flags.
//!
//! Toggle individual diagnostics here; keep them `false` by default so
//! normal runs stay quiet.

pub struct DebugFlags {
    /// Emit a log line for every slice pushed into the feed manager.
    pub print_feed_updates: bool,
    /// Emit engine trigger decisions (which pair was queued and why).
    pub print_engine_triggers: bool,
    /// Emit accepted/absorbed decisions inside the level tracker.
    pub print_level_events: bool,
    /// Emit per-pair consistency warnings while loading a feed fixture.
    pub print_slice_validation: bool,
}

pub const DEBUG_FLAGS: DebugFlags = DebugFlags {
    print_feed_updates: false,
    print_engine_triggers: false,
    print_level_events: false,
    print_slice_validation: true,
};
