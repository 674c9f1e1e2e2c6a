// Copyright 2026 the Roundel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

bitflags::bitflags! {
    /// Work the next draw pass has to do before painting the image.
    ///
    /// Mutation callbacks raise flags; the draw pass clears each flag it
    /// consumes.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct DirtyFlags: u8 {
        /// Re-render the source drawable into the offscreen buffer.
        const REDRAW_BUFFER  = 0b0000_0001;
        /// Rebuild the image brush from the offscreen buffer.
        const REBUILD_SHADER = 0b0000_0010;
    }
}

impl DirtyFlags {
    /// Clear `flag` and report whether it was set.
    pub fn take(&mut self, flag: Self) -> bool {
        let was_set = self.contains(flag);
        self.remove(flag);
        was_set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_clears_only_the_requested_flag() {
        let mut flags = DirtyFlags::REDRAW_BUFFER | DirtyFlags::REBUILD_SHADER;
        assert!(flags.take(DirtyFlags::REDRAW_BUFFER));
        assert!(!flags.take(DirtyFlags::REDRAW_BUFFER));
        assert_eq!(flags, DirtyFlags::REBUILD_SHADER);
    }

    #[test]
    fn default_is_clean() {
        assert!(DirtyFlags::default().is_empty());
    }
}
