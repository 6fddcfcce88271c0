use std::borrow::Borrow;
use std::fmt::Write;

use super::SteamId;

/// Extends iterators that iterate over [`SteamId`]s or [`&SteamId`](SteamId)s
pub trait SteamIdQueryExt: Iterator {
    /// Joins the ids with `sep`, which is how list parameters like
    /// `steamids` are sent.
    ///
    /// Allocates enough space for the whole string up front.
    fn to_steam_id_string<T>(self, sep: &str) -> String
    where
        Self: Sized + Iterator<Item = T>,
        T: Borrow<SteamId>,
    {
        let (lower, _) = self.size_hint();
        let cap = lower * SteamId::MAX_DIGITS_FOR_U64 + lower.saturating_sub(1) * sep.len();
        let mut buf = String::with_capacity(cap);
        for (i, id) in self.enumerate() {
            if i > 0 {
                buf.push_str(sep);
            }
            // writing into a String can't fail
            let _ = write!(buf, "{}", id.borrow());
        }
        buf
    }
}
impl<T: Borrow<SteamId>, I: Iterator<Item = T>> SteamIdQueryExt for I {}
