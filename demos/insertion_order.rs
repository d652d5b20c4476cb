use std::hash::RandomState;

use chain_hash::OrderedHashSet;
use clap::Parser;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short = 'c', long = "count", default_value_t = 200)]
    count: usize,

    #[arg(short = 'b', long = "buckets", default_value_t = chain_hash::DEFAULT_BUCKET_COUNT)]
    buckets: usize,
}

fn print_set(label: &str, set: &OrderedHashSet<String, RandomState>) {
    println!("{label} ({} values):", set.len());
    set.for_each(|value| println!("  {value}"));
}

fn main() {
    let args = Args::parse();

    let mut original =
        OrderedHashSet::with_bucket_count_and_hasher(args.buckets, RandomState::new());

    println!(
        "Created OrderedHashSet with {} buckets, inserting {} strings",
        original.bucket_count(),
        args.count
    );

    for i in 0..args.count {
        original.insert(i.to_string());
    }

    print_set("Original", &original);

    let copy = original.clone();
    original.clear();

    print_set("Original after clear", &original);
    print_set("Copy", &copy);

    println!("Final load factor: {:.2}", copy.load_factor());
    copy.chain_histogram().print();
    copy.debug_stats().print();
}
