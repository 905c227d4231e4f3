// SPDX-License-Identifier: MIT
// Error taxonomy shared by every VAMM package and the contract

use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum VammError {
    // Initialization errors (1000-1099)
    AlreadyInitialized = 1000,
    NotInitialized = 1001,

    // Market / VAMM lookup errors (1100-1199)
    MarketNotFound = 1100,
    VammNotFound = 1101,
    VammAlreadyExists = 1102,

    // Configuration and validation errors (1200-1299)
    OutOfBoundsTick = 1200,
    InvalidRange = 1201,
    InvalidTickSpacing = 1202,
    InvalidSqrtPrice = 1203,
    InvalidSeedObservations = 1204,
    InvalidConfig = 1205,
    PositionLimitExceeded = 1206,

    // Liquidity errors (1300-1399)
    LiquidityOverflow = 1300,
    InsufficientLiquidity = 1301,
    InsufficientPositionLiquidity = 1302,
    InvalidLiquidityAmount = 1303,

    // Order errors (1400-1499)
    ZeroAmount = 1400,
    InvalidPriceLimit = 1401,
    MaturityReached = 1402,
    CloseToMaturity = 1403,

    // Oracle errors (1500-1599)
    InsufficientObservationHistory = 1500,
    InvalidCardinality = 1501,
    TwapNotAdjustable = 1502,

    // Arithmetic errors (1600-1699)
    DivisionByZero = 1600,
    Overflow = 1601,
    MathDomain = 1602,
}
