use partition_discretizer::conf::DiscretizerConfig;
use partition_discretizer::dataset::Dataset;
use partition_discretizer::selector::GreedyDiscretizer;
use partition_discretizer::transform::to_dataframe;
use std::time::Instant;

fn generate_sample_dataset(n_samples: usize, n_noise: usize) -> Dataset {
    let mut x1 = Vec::with_capacity(n_samples);
    let mut x2 = Vec::with_capacity(n_samples);
    let mut noise: Vec<Vec<f64>> = vec![Vec::with_capacity(n_samples); n_noise];
    let mut labels = Vec::with_capacity(n_samples);

    for i in 0..n_samples {
        let a = (i % 20) as f64 / 2.0;
        let b = ((i * 7) % 13) as f64;
        x1.push(a);
        x2.push(b);
        for (j, col) in noise.iter_mut().enumerate() {
            col.push(((i * 11 + j * 5) % 30) as f64 / 3.0);
        }

        // Two-attribute rule
        let label = if a > 6.0 {
            "high"
        } else if b > 8.0 {
            "mid"
        } else {
            "low"
        };
        labels.push(label);
    }

    let mut columns = vec![x1, x2];
    columns.extend(noise);
    Dataset::from_columns(columns, &labels).expect("generated dataset is valid")
}

fn main() {
    let dataset = generate_sample_dataset(400, 3);

    for parallel in [false, true] {
        let config = DiscretizerConfig::default().with_parallel(parallel);
        let mut discretizer = GreedyDiscretizer::new(config);

        let start = Instant::now();
        discretizer.fit(&dataset).expect("fit succeeds");
        println!(
            "parallel={} fitted in {:.2?}, separated {} of {} discordant pairs",
            parallel,
            start.elapsed(),
            discretizer.score(),
            dataset.discordant_pairs()
        );
        println!("{}", discretizer.selection_summary());
    }

    let cut_set = GreedyDiscretizer::default()
        .fit(&dataset)
        .expect("fit succeeds")
        .clone();
    let df = to_dataframe(&dataset, &cut_set).expect("transform succeeds");
    println!("{}", df.head(Some(8)));
}
