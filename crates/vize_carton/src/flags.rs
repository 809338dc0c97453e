//! Patch-flag and slot-flag bit fields shared between the compiler and the
//! (external) runtime. These are a wire contract: the numeric values must
//! match what the renderer expects, so they are plain associated constants
//! rather than a `bitflags!` type — callers OR them into a signed `i32`
//! exactly as the compiler emits them into generated code.

/// VNode patch-flag bits. Only the subset the compiler actually emits is
/// documented here; `HOISTED` and `BAIL` are negative sentinels rather than
/// bits and are never combined with the others.
pub struct PatchFlags;

impl PatchFlags {
    pub const TEXT: i32 = 1;
    pub const CLASS: i32 = 1 << 1;
    pub const STYLE: i32 = 1 << 2;
    pub const PROPS: i32 = 1 << 3;
    pub const FULL_PROPS: i32 = 1 << 4;
    pub const HYDRATE_EVENTS: i32 = 1 << 5;
    pub const STABLE_FRAGMENT: i32 = 1 << 6;
    pub const KEYED_FRAGMENT: i32 = 1 << 7;
    pub const UNKEYED_FRAGMENT: i32 = 1 << 8;
    pub const NEED_PATCH: i32 = 1 << 9;
    pub const DYNAMIC_SLOTS: i32 = 1 << 10;
    pub const DEV_ROOT_FRAGMENT: i32 = 1 << 11;
    pub const HOISTED: i32 = -1;
    pub const BAIL: i32 = -2;

    /// Render the flag as the compiler would in generated code: the bare
    /// number in production, `NUMBER /* NAMES */` in development.
    pub fn to_display_string(flag: i32, dev: bool) -> String {
        if !dev || flag < 0 {
            return flag.to_string();
        }
        let names = Self::names(flag);
        if names.is_empty() {
            flag.to_string()
        } else {
            format!("{flag} /* {} */", names.join(", "))
        }
    }

    fn names(flag: i32) -> Vec<&'static str> {
        const TABLE: &[(i32, &str)] = &[
            (PatchFlags::TEXT, "TEXT"),
            (PatchFlags::CLASS, "CLASS"),
            (PatchFlags::STYLE, "STYLE"),
            (PatchFlags::PROPS, "PROPS"),
            (PatchFlags::FULL_PROPS, "FULL_PROPS"),
            (PatchFlags::HYDRATE_EVENTS, "HYDRATE_EVENTS"),
            (PatchFlags::STABLE_FRAGMENT, "STABLE_FRAGMENT"),
            (PatchFlags::KEYED_FRAGMENT, "KEYED_FRAGMENT"),
            (PatchFlags::UNKEYED_FRAGMENT, "UNKEYED_FRAGMENT"),
            (PatchFlags::NEED_PATCH, "NEED_PATCH"),
            (PatchFlags::DYNAMIC_SLOTS, "DYNAMIC_SLOTS"),
            (PatchFlags::DEV_ROOT_FRAGMENT, "DEV_ROOT_FRAGMENT"),
        ];
        TABLE
            .iter()
            .filter(|(bit, _)| flag & bit != 0)
            .map(|(_, name)| *name)
            .collect()
    }
}

/// Slot object classification, baked into the `_` field of a synthesized
/// slots object so the renderer can shortcut diffing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SlotFlags {
    /// Slot children never change, or only change because the parent
    /// re-rendered (not because of the slot content itself).
    Stable = 1,
    /// Slot references scope variables (v-for/v-slot) or has a dynamic
    /// name, and may change independently from the parent.
    Dynamic = 2,
    /// Slot is forwarded from a parent component's slot, so its stability
    /// depends on that parent.
    Forwarded = 3,
}

impl SlotFlags {
    #[inline]
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}
