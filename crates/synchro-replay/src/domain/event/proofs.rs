//! Kani harnesses for the event model
//!
//! Counters are kept tiny so the decomposition loops stay within the
//! unwind bound.

#![cfg(kani)]

use super::*;

#[kani::proof]
#[kani::unwind(6)]
fn verify_decompose_idempotent() {
    let iops: u64 = kani::any();
    let reads: u64 = kani::any();
    kani::assume(iops <= 2 && reads <= 2);

    let mut event = Event::computation(
        ThreadId::new(0),
        EventId::new(1),
        ComputeCounters::new(iops, 0, reads, 0),
        Vec::new(),
        Vec::new(),
    );

    let first = event.decompose();
    kani::assert(first.is_ok(), "growable queue never overflows");
    let pending = event.pending_sub_events();
    kani::assert(pending as u64 == iops + reads, "one sub-event per operation");

    let second = event.decompose();
    kani::assert(second == Ok(0), "second decompose is a no-op");
    kani::assert(event.pending_sub_events() == pending, "queue unchanged");
    kani::assert(event.sub_events_materialized(), "materialized flag sticks");
}

#[kani::proof]
fn verify_local_record_has_no_producer() {
    let addr: u64 = kani::any();
    let len: u32 = kani::any();
    let thread: u32 = kani::any();
    let event: u64 = kani::any();

    let local = DependencyRecord::local(addr, len);
    let remote = DependencyRecord::remote(ThreadId::new(thread), EventId::new(event), addr, len);

    kani::assert(local.producer().is_none(), "local record has no producer");
    kani::assert(local != remote, "local never equals any remote record");
}

#[kani::proof]
#[kani::unwind(4)]
fn verify_drain_sets_drained() {
    let mut event = Event::communication(
        ThreadId::new(1),
        EventId::new(2),
        vec![DependencyRecord::remote(ThreadId::new(0), EventId::new(1), 0x40, 8)],
    );
    kani::assert(!event.is_drained(), "fresh event is not drained");

    let _ = event.decompose();
    let _ = event.pop_sub_event();
    kani::assert(event.is_drained(), "popping every sub-event drains the event");
}
