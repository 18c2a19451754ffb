/// Possible simplification steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A subtree without parameters was replaced by its value.
    ///
    /// `2*3 = 6`
    /// `sin(0) = 0`
    ConstantFold,

    /// `a+(b+c) = c+(a+b)`
    /// `a*(b*c) = c*(a*b)`
    RotateRight,

    /// `(a+b)+c = (c+a)+b`
    /// `(a*b)*c = (c*a)*b`
    RotateLeft,

    /// `a/1 = a`
    DivByOne,

    /// `0/a = 0`
    ZeroDividend,

    /// `a/a = 1`
    DivSelf,

    /// `a-0 = a`
    SubZero,

    /// `a-a = 0`
    SubSelf,

    /// `a-(-b) = a+b`
    SubNeg,

    /// `1*a = a`
    /// `a*1 = a`
    MulOne,

    /// `0*a = 0`
    /// `a*0 = 0`
    MulZero,

    /// `a*a = sqr(a)`
    MulSelf,

    /// `0+a = a`
    /// `a+0 = a`
    AddZero,

    /// `a+a = a*2`
    AddSelf,

    /// `a+(-b) = a-b`
    AddNeg,

    /// `(-a)+b = b-a`
    NegAdd,

    /// `a^0 = 1`
    PowZero,

    /// `a^1 = a`
    PowOne,

    /// `-(-a) = a`
    DoubleNeg,
}
