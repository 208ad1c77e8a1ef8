// Constants

// Tolerances
pub const DEFAULT_RELATIVE_TOLERANCE: f64 = 1.490_116_119_384_765_6e-8; // sqrt(f64::EPSILON) = 2^-26
pub const DEFAULT_ABSOLUTE_TOLERANCE: f64 = 0.0; // Approximate equality is purely relative by default
pub const BASE_VECTOR_TOLERANCE: f64 = 1e-10; // Smallest |det| accepted for a basis matrix
pub const REDUCTION_TOLERANCE: f64 = 1e-10; // Relative slack for "strictly shorter" in reduction loops

// Iteration limits
pub const MAX_REDUCTION_ITERATIONS: usize = 50; // Monoclinic Gauss reduction passes (safety cap)
pub const MAX_DELAUNAY_ITERATIONS: usize = 100; // Size-reduction passes and Selling steps
pub const MAX_RESOLUTION_DEPTH: usize = 7; // One transition per lattice system at most

// Supercell search
pub const DEFAULT_SUPERCELL_TOLERANCE: f64 = 1e-3; // Relative, component-wise on the metric tensor
pub const DEFAULT_MAX_INDEX: i32 = 3; // Entries of the integer transformation lie in [-3, 3]
