mod workplace;

pub use workplace::{
    AssignedEmployee, AssignedEmployeeResponse, AssignmentResponse, CreateAssignmentRequest,
    CreateWorkplaceRequest, UpdateWorkplaceRequest, Workplace, WorkplaceAssignment,
    WorkplaceResponse,
};
