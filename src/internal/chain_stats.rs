#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::pedantic)]
#![allow(warnings)]

use chainmap::{KeyHasher, PerCharHasher, PolynomialHasher, SipKeyHasher};
use plotters::prelude::*;
use rand::Rng;

// Fixed bucket count for the simulation; the library itself resizes, but a
// static array makes the per-strategy distributions directly comparable.
const BUCKET_COUNT: usize = 4096;
// Load factors from 0.1 to 0.95
const NUM_LOAD_FACTORS: usize = 10;

// Hashing strategies to compare
const STRATEGIES: [&str; 3] = ["Per-Char Hash", "Polynomial Hash", "Sip Hash"];

// Random lowercase key, 3 to 10 characters
fn random_key(rng: &mut impl Rng) -> String {
    let len = rng.random_range(3..=10);
    (0..len).map(|_| char::from(b'a' + rng.random_range(0..26))).collect()
}

fn bucket_of(strategy: &str, key: &str) -> usize {
    let hash = match strategy {
        "Per-Char Hash" => PerCharHasher.hash_key(key),
        "Polynomial Hash" => PolynomialHasher.hash_key(key),
        "Sip Hash" => SipKeyHasher.hash_key(key),
        _ => panic!("Unknown strategy"),
    };
    (hash as usize) & (BUCKET_COUNT - 1)
}

// Chain-length statistics for one filled table: (average over non-empty
// buckets, longest chain, fraction of empty buckets)
fn chain_stats(chain_lengths: &[usize]) -> (f64, usize, f64) {
    let occupied: Vec<usize> = chain_lengths.iter().copied().filter(|&len| len > 0).collect();
    let longest = chain_lengths.iter().copied().max().unwrap_or(0);
    let empty = chain_lengths.len() - occupied.len();

    let average = if occupied.is_empty() {
        0.0
    } else {
        occupied.iter().sum::<usize>() as f64 / occupied.len() as f64
    };
    let empty_fraction = empty as f64 / chain_lengths.len() as f64;

    (average, longest, empty_fraction)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Generate load factors from 0.1 to 0.95
    let load_factors: Vec<f64> = (0..NUM_LOAD_FACTORS)
        .map(|i| 0.1 + (0.95 - 0.1) * (i as f64) / ((NUM_LOAD_FACTORS - 1) as f64))
        .collect();

    // Calculate number of keys for each load factor
    let num_keys: Vec<usize> =
        load_factors.iter().map(|&load| (BUCKET_COUNT as f64 * load) as usize).collect();

    println!("Load factors: {:?}", load_factors);
    println!("Number of keys: {:?}", num_keys);

    // Results storage
    let mut average_chain_length: Vec<Vec<f64>> = vec![Vec::new(); STRATEGIES.len()];
    let mut longest_chain: Vec<Vec<usize>> = vec![Vec::new(); STRATEGIES.len()];

    // Generate random keys outside the loop to ensure fair comparison
    let mut rng = rand::rng();
    let max_keys_needed = *num_keys.iter().max().unwrap();
    let keys: Vec<String> = (0..max_keys_needed).map(|_| random_key(&mut rng)).collect();

    // Running experiments
    for &n_keys in &num_keys {
        println!("Testing with {} keys", n_keys);

        for (strategy_idx, &strategy) in STRATEGIES.iter().enumerate() {
            let mut chain_lengths: Vec<usize> = vec![0; BUCKET_COUNT];

            for key in keys.iter().take(n_keys) {
                chain_lengths[bucket_of(strategy, key)] += 1;
            }

            let (average, longest, empty_fraction) = chain_stats(&chain_lengths);

            average_chain_length[strategy_idx].push(average);
            longest_chain[strategy_idx].push(longest);

            println!(
                "  {}: Avg chain = {:.2}, Longest = {}, Empty buckets = {:.1}%",
                strategy,
                average,
                longest,
                empty_fraction * 100.0
            );
        }
    }

    // Plot configuration
    let font_family = "sans-serif";

    let colors = [
        RGBColor(220, 50, 50), // Bright red
        RGBColor(50, 90, 220), // Bright blue
        RGBColor(50, 180, 50), // Bright green
    ];

    let line_width = 2;
    let marker_size = 4;
    let text_size = 16;
    let title_size = 35;

    // Custom x-axis labels shared by both plots
    let x_labels: Vec<String> = num_keys.iter().map(|&n| n.to_string()).collect();

    // Plot 1: Average chain length per non-empty bucket
    let root = BitMapBackend::new("average_chain_length.png", (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_avg = average_chain_length
        .iter()
        .flat_map(|v| v.iter())
        .fold(0.0, |max, &x| if x > max { x } else { max }) *
        1.1; // Add 10% margin

    let mut chart = ChartBuilder::on(&root)
        .caption("Average Chain Length per Hashing Strategy", (font_family, title_size))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .right_y_label_area_size(10)
        .build_cartesian_2d(0..(num_keys.len() - 1), 0.0..max_avg)?;

    chart
        .configure_mesh()
        .x_labels(num_keys.len() - 1)
        .x_label_formatter(&|x| {
            if *x < x_labels.len() { x_labels[*x].clone() } else { "".to_string() }
        })
        .x_desc("Number of Keys Inserted")
        .y_desc("Average Chain Length (non-empty buckets)")
        .axis_desc_style((font_family, text_size))
        .draw()?;

    for (strategy_idx, &strategy) in STRATEGIES.iter().enumerate() {
        let color = &colors[strategy_idx % colors.len()];
        let line_style = ShapeStyle::from(color).stroke_width(line_width);

        chart
            .draw_series(LineSeries::new(
                (0..num_keys.len() - 1).map(|i| (i, average_chain_length[strategy_idx][i])),
                line_style,
            ))?
            .label(strategy)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));

        chart.draw_series((0..num_keys.len() - 1).map(|i| {
            Circle::new((i, average_chain_length[strategy_idx][i]), marker_size, color.filled())
        }))?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    // Plot 2: Longest chain (worst-case scan length)
    let root = BitMapBackend::new("longest_chain.png", (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_longest = longest_chain
        .iter()
        .flat_map(|v| v.iter())
        .fold(0, |max, &x| if x > max { x } else { max }) as f64 *
        1.1; // Add 10% margin

    let mut chart = ChartBuilder::on(&root)
        .caption("Longest Chain per Hashing Strategy", (font_family, title_size))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .right_y_label_area_size(10)
        .build_cartesian_2d(0..(num_keys.len() - 1), 0.0..max_longest)?;

    chart
        .configure_mesh()
        .x_labels(num_keys.len() - 1)
        .x_label_formatter(&|x| {
            if *x < x_labels.len() { x_labels[*x].clone() } else { "".to_string() }
        })
        .x_desc("Number of Keys Inserted")
        .y_desc("Longest Chain (worst-case scan)")
        .axis_desc_style((font_family, text_size))
        .draw()?;

    for (strategy_idx, &strategy) in STRATEGIES.iter().enumerate() {
        let color = &colors[strategy_idx % colors.len()];
        let line_style = ShapeStyle::from(color).stroke_width(line_width);

        chart
            .draw_series(LineSeries::new(
                (0..num_keys.len() - 1).map(|i| (i, longest_chain[strategy_idx][i] as f64)),
                line_style,
            ))?
            .label(strategy)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));

        chart.draw_series((0..num_keys.len() - 1).map(|i| {
            Circle::new((i, longest_chain[strategy_idx][i] as f64), marker_size, color.filled())
        }))?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    println!("Generated plot images: average_chain_length.png, longest_chain.png");

    Ok(())
}
