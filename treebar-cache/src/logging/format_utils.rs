//! Formatting utilities for log output

use std::fmt;

use itertools::Itertools;

use crate::node::NodeId;

/// Format a value with multi-line Debug output.
pub fn pretty<T: fmt::Debug>(value: &T) -> PrettyDebug<'_, T> {
    PrettyDebug(value)
}

pub struct PrettyDebug<'a, T: ?Sized>(&'a T);

impl<T: fmt::Debug + ?Sized> fmt::Display for PrettyDebug<'_, T> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{:#?}", self.0)
    }
}

impl<T: fmt::Debug + ?Sized> fmt::Debug for PrettyDebug<'_, T> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{:#?}", self.0)
    }
}

/// Compact id-list rendering for debug events: `[1, 2, 3 ..+4]`.
pub fn short_list(ids: &[NodeId]) -> String {
    const SHOWN: usize = 3;
    let head = ids.iter().take(SHOWN).map(ToString::to_string).join(", ");
    if ids.len() > SHOWN {
        format!("[{head} ..+{}]", ids.len() - SHOWN)
    } else {
        format!("[{head}]")
    }
}

/// Log with pretty-printed values.
#[macro_export]
macro_rules! pretty_log {
    ($level:ident, $value:expr, $msg:literal) => {{
        use $crate::logging::format_utils::pretty;
        tracing::$level!(value = %pretty(&$value), $msg);
    }};
}
