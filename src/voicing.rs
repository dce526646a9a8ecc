/// Applies `transform` to each sequence and concatenates the results in order.
pub fn expand<F>(sequences: &[Vec<i32>], transform: F) -> Vec<Vec<i32>>
where
    F: Fn(&[i32]) -> Vec<Vec<i32>>,
{
    sequences.iter().flat_map(|seq| transform(seq)).collect()
}

/// Saturates at the `i32` bounds. Such steps fall outside every scale and
/// are rejected when the voice is resolved.
fn shifted(seq: &[i32], by: i32) -> Vec<i32> {
    seq.iter().map(|i| i.saturating_add(by)).collect()
}

/// One copy per interval, each step shifted by that interval.
/// `stack(vec![0, 1])` is a unison plus a third above in scale-step space.
pub fn stack(intervals: Vec<i32>) -> impl Fn(&[i32]) -> Vec<Vec<i32>> {
    move |seq: &[i32]| intervals.iter().map(|&j| shifted(seq, j)).collect()
}

/// `count` copies, each one `notes_per_octave` steps above the last.
pub fn octaves(notes_per_octave: usize, count: usize) -> impl Fn(&[i32]) -> Vec<Vec<i32>> {
    let span = i32::try_from(notes_per_octave).unwrap_or(i32::MAX);
    move |seq: &[i32]| {
        (0..count)
            .map(|j| {
                let j = i32::try_from(j).unwrap_or(i32::MAX);
                shifted(seq, j.saturating_mul(span))
            })
            .collect()
    }
}

pub fn duplicate(count: usize) -> impl Fn(&[i32]) -> Vec<Vec<i32>> {
    move |seq: &[i32]| vec![seq.to_vec(); count]
}
