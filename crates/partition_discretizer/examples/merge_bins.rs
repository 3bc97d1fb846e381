use partition_discretizer::merger::IntervalMerger;

fn main() {
    let values = [1.0, 1.5, 2.0, 3.0, 3.5, 4.0, 5.0, 6.0, 6.5, 7.0, 8.0, 9.0];
    let labels = ["a", "a", "b", "b", "b", "a", "a", "c", "c", "c", "a", "a"];

    for max_bins in [8, 5, 3, 1] {
        let mut merger = IntervalMerger::new(max_bins).expect("max_bins is positive");
        let bins = merger
            .fit_transform(&values, &labels)
            .expect("fit succeeds");
        let separated = merger
            .count_separated_pairs(&values, &labels)
            .expect("merger is fitted");
        println!("max_bins={max_bins}: {:?}", merger.bins());
        println!("  assignment {:?}, separated pairs {}", bins, separated);
    }
}
