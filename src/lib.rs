pub mod configuration;

pub mod math {
    pub mod curve {
        pub mod curve;
        pub mod nonparametriccurve {
            pub mod nonparametriccurve;
            pub mod cubicspline;
            pub mod lagrangepolynomial;
        }
    }
    pub mod interpolationerror;
    pub mod polynomial {
        pub mod polynomial;
        pub mod newtonsolver;
        pub mod polynomialformat;
    }
}
