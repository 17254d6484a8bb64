//! # Automated Market Maker (AMM) Module
//!
//! This module implements the **logit yield curve** used to trade SY for PT,
//! together with the share accounting for liquidity providers.
//!
//! ## The Logit AMM
//!
//! Unlike constant-product AMMs (x * y = k), a yield pool prices PT from the
//! log-odds of the PT share of the pool:
//!
//! ```text
//!   price ▲
//!         │                          ╭───
//!         │                    ╭─────╯
//!  anchor ┼ ─ ─ ─ ─ ─ ─ ─ ╭────╯
//!         │         ╭─────╯
//!         │   ╭─────╯
//!         │───╯
//!         └────────────────┼──────────────▶ PT / (SY + PT)
//!         0               0.5              1
//! ```
//!
//! Pipeline for every request:
//!
//! ```text
//!   swap ──► swap::compute_swap ──► LogitCurve ──► fixed_point::ln_wad
//!                   │
//!                   ▼
//!             Pool::apply_swap
//!
//!   add / remove ──► LiquidityManager ──► LiquidityCurve + ShareLedger
//! ```

pub mod errors;
pub mod fixed_point;
pub mod liquidity;
pub mod logit_curve;
pub mod swap;

pub use errors::*;
pub use fixed_point::*;
pub use liquidity::*;
pub use logit_curve::*;
pub use swap::*;
