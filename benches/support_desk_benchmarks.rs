use chrono::{Duration, TimeZone, Utc};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use support_desk::board::Board;
use support_desk::core::{Category, Priority, Status, Ticket, TicketBuilder};
use support_desk::metrics::compute_metrics;
use support_desk::query::{TicketFilter, filter_tickets};

fn synthetic_tickets(count: usize) -> Vec<Ticket> {
    let start = Utc
        .with_ymd_and_hms(2025, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_else(Utc::now);

    (0..count)
        .map(|i| {
            let created_at = start + Duration::minutes(i as i64 * 7);
            let status = Status::ALL[i % Status::ALL.len()];
            let mut builder = TicketBuilder::new()
                .title(format!("Ticket {i}"))
                .category(Category::ALL[i % Category::ALL.len()])
                .priority(Priority::ALL[(i / 3) % Priority::ALL.len()])
                .status(status)
                .customer_email(format!("customer{}@example.com", i % 50))
                .created_at(created_at);
            if status == Status::Resolved {
                builder = builder.resolved_at(created_at + Duration::hours((i % 48) as i64));
            }
            builder.build()
        })
        .collect()
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_tickets");
    for size in [100, 1000, 10_000] {
        let tickets = synthetic_tickets(size);
        let filter = TicketFilter::new()
            .with_status(Status::Open)
            .with_category(Category::Technical);
        group.bench_with_input(BenchmarkId::from_parameter(size), &tickets, |b, tickets| {
            b.iter(|| filter_tickets(black_box(tickets), black_box(&filter)));
        });
    }
    group.finish();
}

fn bench_board(c: &mut Criterion) {
    let tickets = synthetic_tickets(1000);
    c.bench_function("board_build_1000", |b| {
        b.iter(|| Board::build(black_box(&tickets)));
    });
}

fn bench_metrics(c: &mut Criterion) {
    let tickets = synthetic_tickets(1000);
    c.bench_function("compute_metrics_1000", |b| {
        b.iter(|| compute_metrics(black_box(&tickets)));
    });
}

criterion_group!(benches, bench_filter, bench_board, bench_metrics);
criterion_main!(benches);
