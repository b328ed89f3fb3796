//! End-to-end scan tests against an in-memory provider.
