mod revenue;

pub use revenue::{
    CreateRevenueRequest, ListedRevenue, Revenue, RevenueResponse, UpdateRevenueRequest,
};
