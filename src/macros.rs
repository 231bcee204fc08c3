/// Builds a [`Node`](crate::Node) from a JSON-like literal.
///
/// Arrays and tables nest; any other expression goes through
/// `Node::from`. There is no `null`, as TOML has none.
///
/// ```rust
/// use serde_tomlite::{toml, Node};
///
/// let plugin = toml!({
///     "name": "tmux-sensible",
///     "pinned": true,
///     "tags": ["core", "defaults"]
/// });
/// assert_eq!(plugin.get("pinned"), Some(&Node::from(true)));
/// ```
#[macro_export]
macro_rules! toml {
    (true) => {
        $crate::Node::Boolean(true)
    };

    (false) => {
        $crate::Node::Boolean(false)
    };

    ([]) => {
        $crate::Node::Array(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Node::Array(vec![$($crate::toml!($elem)),*])
    };

    ({}) => {
        $crate::Node::Table($crate::Table::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut table = $crate::Table::new();
        $(
            table.insert($key.to_string(), $crate::toml!($value));
        )*
        $crate::Node::Table(table)
    }};

    ($s:expr) => {
        $crate::Node::from($s)
    };
}
