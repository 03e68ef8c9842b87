use core::ops::ControlFlow;

/// Visits every permutation of `items` by in-place swapping and
/// backtracking, stopping as soon as `visit` breaks.
///
/// For `n` items there are `n!` visits unless `visit` returns
/// [`ControlFlow::Break`], in which case no further permutation is generated
/// and the break value is returned. The first permutation visited is `items`
/// in its given order. `items` is restored to its original order before
/// returning, whether or not the search was cut short.
///
/// An empty slice has exactly one (empty) permutation.
pub fn for_each_permutation<T, B, F>(items: &mut [T], visit: &mut F) -> ControlFlow<B>
where
    F: FnMut(&[T]) -> ControlFlow<B>,
{
    permute(items, 0, visit)
}

fn permute<T, B, F>(items: &mut [T], fixed: usize, visit: &mut F) -> ControlFlow<B>
where
    F: FnMut(&[T]) -> ControlFlow<B>,
{
    if fixed + 1 >= items.len() {
        return visit(items);
    }

    for i in fixed..items.len() {
        items.swap(fixed, i);
        let flow = permute(items, fixed + 1, visit);
        items.swap(fixed, i);
        flow?;
    }

    ControlFlow::Continue(())
}
