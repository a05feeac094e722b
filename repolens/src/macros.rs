/// Builds a `Vec<ChatTurn>` from role/content pairs.
///
/// ```rust
/// use repolens::{TurnRole, rl_turns};
///
/// let turns = rl_turns![
///     user => "What does this crate do?",
///     assistant => "It parses config files.",
/// ];
///
/// assert_eq!(turns.len(), 2);
/// assert_eq!(turns[1].role, TurnRole::Assistant);
/// ```
#[macro_export]
macro_rules! rl_turns {
    () => {
        ::std::vec::Vec::<$crate::ChatTurn>::new()
    };
    ($($role:ident => $content:expr),+ $(,)?) => {
        vec![$($crate::rl_turns!(@turn $role => $content)),+]
    };
    (@turn user => $content:expr) => {
        $crate::ChatTurn::user($content)
    };
    (@turn assistant => $content:expr) => {
        $crate::ChatTurn::assistant($content)
    };
    (@turn $role:ident => $content:expr) => {
        compile_error!("unsupported role: use user or assistant")
    };
}
