mod cost;

pub use cost::{
    CostEntry, CostKind, CostResponse, CreateCostRequest, CreateEntryRequest, EntryResponse,
    ListedCost, UpdateCostRequest,
};
