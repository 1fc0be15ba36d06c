use combinatoria::{
    Combinations, DyckPaths, Enumeration, MotzkinPaths, Partitions, Permutations, RangeError,
    SetPartitions, Subsets, Transition,
};
use divan::AllocProfiler;

#[global_allocator]
static ALLOC: AllocProfiler = AllocProfiler::system();

fn main() {
    // Run registered benchmarks.
    divan::main();
}

///Walks a whole family in place and returns how many objects it saw.
fn walk<E: Enumeration>(family: &E) -> u64 {
    let mut state = family.first();
    let mut seen = 1;
    while state.to_successor() {
        divan::black_box(state.as_slice());
        seen += 1;
    }
    seen
}

#[divan::bench(args = [(20, 5), (24, 12)])]
fn combinations(args: (usize, usize)) -> Result<u64, RangeError> {
    let (n, k) = divan::black_box(args);
    Ok(walk(&Combinations::<u8>::new(n, k)?))
}

#[divan::bench(args = [8, 10])]
fn permutations(n: usize) -> Result<u64, RangeError> {
    Ok(walk(&Permutations::<u8>::new(divan::black_box(n))?))
}

#[divan::bench(args = [16, 20])]
fn subsets(n: usize) -> Result<u64, RangeError> {
    Ok(walk(&Subsets::new(divan::black_box(n))?))
}

#[divan::bench(args = [40, 60])]
fn partitions(n: usize) -> Result<u64, RangeError> {
    Ok(walk(&Partitions::<u8>::new(divan::black_box(n))?))
}

#[divan::bench(args = [10, 11])]
fn set_partitions(n: usize) -> Result<u64, RangeError> {
    Ok(walk(&SetPartitions::<u8>::new(divan::black_box(n))?))
}

#[divan::bench(args = [10, 12])]
fn dyck_paths(n: usize) -> Result<u64, RangeError> {
    Ok(walk(&DyckPaths::new(divan::black_box(n))?))
}

#[divan::bench(args = [14, 16])]
fn motzkin_paths(n: usize) -> Result<u64, RangeError> {
    Ok(walk(&MotzkinPaths::new(divan::black_box(n))?))
}

#[divan::bench]
fn unranking(bencher: divan::Bencher) {
    let family = Combinations::<u32>::new(60, 30).expect("C(60, 30) fits in a u64");
    let step = family.len() / 1000;
    bencher.bench(|| {
        (0..1000)
            .map(|i| family.unrank(i * step).map(|state| state.as_slice()[29]))
            .sum::<Result<u32, _>>()
    });
}

#[divan::bench]
fn owned_iteration(bencher: divan::Bencher) {
    let family = Permutations::<u8>::new(8).expect("8! fits in a u64");
    bencher.bench(|| family.iter().map(|permutation| permutation[0] as usize).sum::<usize>());
}
