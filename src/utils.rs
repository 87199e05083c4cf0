/// Creates a [`HashSet`](std::collections::HashSet) containing the arguments, similar to
/// [`vec!`]. The caller must have `HashSet` in scope.
#[macro_export] macro_rules! hashset {
    ($( $x: expr ),* $(,)?) => {
        {
            let mut tmp = HashSet::new();
            $(
                tmp.insert($x);
            )*
            tmp
        }
    };
}
